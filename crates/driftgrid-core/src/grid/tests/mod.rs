mod effects_tests;
mod layout_tests;

pub(crate) const CLIFF_MAP: [&str; 4] = [
    "RRRRRRRRRRRR",
    "RRRRRRRRRRRR",
    "RRRRRRRRRRRR",
    "SCCCCCCCCCCG",
];
