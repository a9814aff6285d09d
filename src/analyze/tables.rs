//! Static scoring and vocabulary tables. Entries are lowercase; matching is
//! case-insensitive.

/// Minimum README length in characters and the points it earns. Ordered by
/// threshold so the last satisfied row wins.
pub const LENGTH_TIERS: &[(usize, u32)] = &[(200, 1), (500, 2), (1500, 3)];

pub const HEADING_POINTS: u32 = 1;
pub const CODE_BLOCK_POINTS: u32 = 1;
pub const LIST_POINTS: u32 = 1;
pub const DESCRIPTION_POINTS: u32 = 1;
pub const LANGUAGE_POINTS: u32 = 1;

/// Distinct scaffold phrases at or above this count mean the README was never
/// customised and the score collapses to zero.
pub const SCAFFOLD_HIT_THRESHOLD: usize = 2;

/// Boilerplate phrase and the points it subtracts.
pub const BOILERPLATE_PHRASES: &[(&str, u32)] = &[
    // create-react-app
    ("bootstrapped with [create react app]", 2),
    ("in the project directory, you can run", 2),
    ("you can learn more in the [create react app documentation]", 2),
    ("this section has moved here", 2),
    // create-next-app
    ("project bootstrapped with [`create-next-app`]", 2),
    ("first, run the development server", 2),
    // vite templates
    ("this template provides a minimal setup to get react working in vite", 2),
    ("currently, two official plugins are available", 2),
    // angular cli
    ("this project was generated with [angular cli]", 2),
    ("run `ng serve` for a dev server", 2),
    // vue cli
    ("see [configuration reference](https://cli.vuejs.org/config/)", 2),
    // rails
    ("this readme would normally document whatever steps are necessary", 2),
    // gitlab project template
    ("to make it easy for you to get started with gitlab", 2),
    ("already a pro? just edit this readme.md and make it your own", 2),
    // placeholders
    ("lorem ipsum", 1),
    ("todo: write", 1),
    ("describe your project here", 1),
];

/// Primary languages that earn the metadata bonus.
pub const KNOWN_LANGUAGES: &[&str] = &[
    "c", "c#", "c++", "clojure", "css", "dart", "elixir", "erlang", "go", "haskell", "html",
    "java", "javascript", "jupyter notebook", "kotlin", "lua", "objective-c", "ocaml", "perl",
    "php", "python", "r", "ruby", "rust", "scala", "shell", "solidity", "swift", "typescript",
    "vue", "zig",
];

/// Needle searched in README text and the label reported for it.
pub const TECH_KEYWORDS: &[(&str, &str)] = &[
    ("android", "android"),
    ("angular", "angular"),
    ("asp.net", "asp.net"),
    ("aws", "aws"),
    ("azure", "azure"),
    ("bootstrap", "bootstrap"),
    ("c#", "c#"),
    ("c++", "c++"),
    ("css", "css"),
    ("dart", "dart"),
    ("django", "django"),
    ("docker", "docker"),
    ("electron", "electron"),
    ("elixir", "elixir"),
    ("express", "express"),
    ("fastapi", "fastapi"),
    ("firebase", "firebase"),
    ("flask", "flask"),
    ("flutter", "flutter"),
    ("golang", "go"),
    ("graphql", "graphql"),
    ("haskell", "haskell"),
    ("html", "html"),
    ("java", "java"),
    ("javascript", "javascript"),
    ("jupyter", "jupyter"),
    ("kafka", "kafka"),
    ("kotlin", "kotlin"),
    ("kubernetes", "kubernetes"),
    ("langchain", "langchain"),
    ("laravel", "laravel"),
    ("mongodb", "mongodb"),
    ("mysql", "mysql"),
    ("next.js", "next.js"),
    ("nextjs", "next.js"),
    ("nginx", "nginx"),
    ("node.js", "node.js"),
    ("nodejs", "node.js"),
    ("numpy", "numpy"),
    ("openai", "openai"),
    ("opencv", "opencv"),
    ("pandas", "pandas"),
    ("php", "php"),
    ("postgres", "postgresql"),
    ("postgresql", "postgresql"),
    ("python", "python"),
    ("pytorch", "pytorch"),
    ("rails", "rails"),
    ("react", "react"),
    ("redis", "redis"),
    ("ruby", "ruby"),
    ("rust", "rust"),
    ("sass", "sass"),
    ("scala", "scala"),
    ("scikit-learn", "scikit-learn"),
    ("spring boot", "spring boot"),
    ("sqlite", "sqlite"),
    ("svelte", "svelte"),
    ("swift", "swift"),
    ("tailwind", "tailwind"),
    ("tensorflow", "tensorflow"),
    ("terraform", "terraform"),
    ("tokio", "tokio"),
    ("typescript", "typescript"),
    ("unity", "unity"),
    ("vite", "vite"),
    ("vue", "vue"),
    ("webassembly", "webassembly"),
    ("webpack", "webpack"),
];

/// Upper bound on reported technologies.
pub const MAX_TECHNOLOGIES: usize = 12;
