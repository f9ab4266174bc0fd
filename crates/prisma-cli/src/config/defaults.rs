use directories::ProjectDirs;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Keys bound to fixed viewer actions; filter keys may not use them, in
/// either case.
pub const RESERVED_KEYS: &[char] = &['a', 's', 'd', 'f', 'x', 'h', 'q'];

pub struct DefaultFilter {
    pub name: &'static str,
    pub field: &'static str,
    pub key: char,
}

pub const DEFAULT_FILTERS: &[DefaultFilter] = &[
    DefaultFilter {
        name: "chain",
        field: "CHAIN_ID",
        key: 'c',
    },
    DefaultFilter {
        name: "element",
        field: "ELEMENT",
        key: 'e',
    },
    DefaultFilter {
        name: "residue",
        field: "RES_NAME",
        key: 'r',
    },
];

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "diegobarmor", "molprisma")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
