#![allow(dead_code)]

use ll1::{Symbol, SymbolSet};

pub fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn set(syms: impl IntoIterator<Item = Symbol>) -> SymbolSet {
    syms.into_iter().collect()
}
