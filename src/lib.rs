//! # recency-cache
//!
//! Cache chave/valor de capacidade fixa com eviction LRU (Least Recently
//! Used) e operações O(1): lookup, inserção, atualização e eviction.
//!
//! ## Módulos
//!
//! - [`cache`] - O [`RecencyCache`] e suas estatísticas
//! - [`console`] - Console de comandos orientado a linhas sobre o cache
//! - `cli` - Interface de linha de comando (feature `cli`)
//! - [`types`] - Configuração e erros
//!
//! ## Exemplo
//!
//! ```
//! use recency_cache::RecencyCache;
//!
//! let mut cache = RecencyCache::new(2).unwrap();
//! cache.put(1, 11);
//! cache.put(2, 22);
//! cache.get(&1);
//! cache.put(3, 33); // evicta a chave 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some(&11));
//! ```

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod console;
pub mod types;

pub use cache::{CacheStats, RecencyCache};
pub use types::config::Config;
pub use types::errors::{RecencyError, RecencyResult};
