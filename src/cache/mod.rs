//! Cache LRU de capacidade fixa.
//!
//! Este módulo implementa o [`RecencyCache`]: um índice `HashMap` combinado
//! com uma lista duplamente encadeada de recência, mantidos consistentes em
//! toda operação. Quando cheio, inserir uma chave nova descarta a entrada
//! usada há mais tempo.

mod lru;

pub use lru::{CacheStats, Iter, RecencyCache};
