//! Cache LRU de capacidade fixa.
//!
//! As entradas vivem numa arena (`Vec` de slots) e formam uma lista
//! duplamente encadeada por índices, da mais recente (cabeça) à menos
//! recente (cauda). O índice `HashMap<K, usize>` aponta para o slot de cada
//! entrada, então lookup, toque, inserção e eviction custam O(1) esperado.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::num::NonZeroUsize;

use serde::Serialize;

use crate::{RecencyError, RecencyResult};

/// Nó da lista de recência.
struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Estatísticas do cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Número atual de entradas.
    pub size: usize,

    /// Capacidade máxima.
    pub capacity: usize,

    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,

    /// Entradas removidas por falta de espaço.
    pub evictions: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache chave/valor limitado por capacidade, com eviction LRU estrita.
///
/// Só `get`, `put`/`push` e `clear` alteram a estrutura. As demais operações
/// são visões somente leitura: não existe forma de religar nós por fora.
pub struct RecencyCache<K, V> {
    capacity: NonZeroUsize,
    index: HashMap<K, usize>,
    slots: Vec<Entry<K, V>>,
    head: Option<usize>,
    tail: Option<usize>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K: Hash + Eq + Clone, V> RecencyCache<K, V> {
    /// Cria um cache vazio.
    ///
    /// Retorna [`RecencyError::ZeroCapacity`] se `capacity` for zero.
    pub fn new(capacity: usize) -> RecencyResult<Self> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(RecencyError::ZeroCapacity)
    }

    /// Cria um cache vazio a partir de uma capacidade já validada.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            index: HashMap::new(),
            slots: Vec::new(),
            head: None,
            tail: None,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Busca no cache.
    ///
    /// Em caso de acerto a entrada passa a ser a mais recente. Um miss
    /// retorna `None` e não mexe na ordem de nenhuma outra chave.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key).copied() {
            Some(slot) => {
                self.hits += 1;
                self.touch(slot);
                Some(&self.slots[slot].value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insere ou atualiza uma entrada.
    pub fn put(&mut self, key: K, value: V) {
        self.push(key, value);
    }

    /// Insere ou atualiza uma entrada, devolvendo a entrada evictada.
    ///
    /// Atualizar uma chave existente nunca causa eviction. Inserir uma chave
    /// nova com o cache cheio remove exatamente a entrada menos recente.
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&slot) = self.index.get(&key) {
            self.slots[slot].value = value;
            self.touch(slot);
            return None;
        }

        let entry = Entry {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        };

        let (slot, evicted) = match self.evict_tail() {
            Some(slot) => {
                // O slot da cauda é reaproveitado pela nova entrada.
                let old = std::mem::replace(&mut self.slots[slot], entry);
                (slot, Some((old.key, old.value)))
            }
            None => {
                self.slots.push(entry);
                (self.slots.len() - 1, None)
            }
        };

        self.index.insert(key, slot);
        self.attach_head(slot);
        evicted
    }

    /// Consulta sem tocar a entrada e sem contar nas estatísticas.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.slots[slot].value)
    }

    /// Verifica se a chave está no cache, sem tocá-la.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Remove todas as entradas. As estatísticas são preservadas.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.head = None;
        self.tail = None;
    }

    /// Desliga a cauda se o cache estiver cheio e devolve o slot liberado.
    fn evict_tail(&mut self) -> Option<usize> {
        if self.index.len() < self.capacity.get() {
            return None;
        }
        let tail = self.tail?;
        self.index.remove(&self.slots[tail].key);
        self.detach(tail);
        self.evictions += 1;
        Some(tail)
    }
}

impl<K, V> RecencyCache<K, V> {
    /// Número de entradas.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Verifica se o cache está vazio.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Verifica se a próxima chave nova vai causar eviction.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity.get()
    }

    /// Capacidade fixada na construção.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Entrada mais recente (cabeça da lista).
    pub fn most_recent(&self) -> Option<(&K, &V)> {
        self.head.map(|slot| self.pair(slot))
    }

    /// Entrada menos recente (cauda da lista), a próxima a ser evictada.
    pub fn least_recent(&self) -> Option<(&K, &V)> {
        self.tail.map(|slot| self.pair(slot))
    }

    /// Itera da entrada mais recente para a menos recente.
    ///
    /// Use `.rev()` para a ordem de eviction.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            front: self.head,
            back: self.tail,
            remaining: self.slots.len(),
        }
    }

    /// Chaves da mais recente para a menos recente.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            capacity: self.capacity(),
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }

    fn pair(&self, slot: usize) -> (&K, &V) {
        let entry = &self.slots[slot];
        (&entry.key, &entry.value)
    }

    /// Move a entrada para a cabeça.
    fn touch(&mut self, slot: usize) {
        if self.head == Some(slot) {
            return;
        }
        self.detach(slot);
        self.attach_head(slot);
    }

    /// Religa os vizinhos do nó entre si (ou ajusta cabeça/cauda).
    fn detach(&mut self, slot: usize) {
        let (prev, next) = {
            let entry = &self.slots[slot];
            (entry.prev, entry.next)
        };

        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }

        let entry = &mut self.slots[slot];
        entry.prev = None;
        entry.next = None;
    }

    fn attach_head(&mut self, slot: usize) {
        let old_head = self.head;
        {
            let entry = &mut self.slots[slot];
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(h) => self.slots[h].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }
}

/// Iterador sobre as entradas em ordem de recência.
pub struct Iter<'a, K, V> {
    slots: &'a [Entry<K, V>],
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slots = self.slots;
        let entry = &slots[self.front?];
        self.front = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slots = self.slots;
        let entry = &slots[self.back?];
        self.back = entry.prev;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a RecencyCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for RecencyCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self {
            writeln!(f, "[{}, {}]", key, value)?;
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RecencyCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> RecencyCache<i32, i32> {
        RecencyCache::new(capacity).unwrap()
    }

    fn order(cache: &RecencyCache<i32, i32>) -> Vec<i32> {
        cache.keys().copied().collect()
    }

    /// Percorre a lista nos dois sentidos e confere contra o índice.
    pub(super) fn assert_invariants<K, V>(cache: &RecencyCache<K, V>)
    where
        K: Hash + Eq + Clone + fmt::Debug,
    {
        assert!(cache.len() <= cache.capacity());
        assert_eq!(cache.index.len(), cache.slots.len());
        assert_eq!(cache.head.is_none(), cache.tail.is_none());
        assert_eq!(cache.is_empty(), cache.len() == 0);

        let mut seen = 0;
        let mut prev = None;
        let mut cursor = cache.head;
        while let Some(slot) = cursor {
            let entry = &cache.slots[slot];
            assert_eq!(entry.prev, prev, "link prev quebrado no slot {}", slot);
            assert_eq!(cache.index.get(&entry.key), Some(&slot));
            prev = Some(slot);
            cursor = entry.next;
            seen += 1;
            assert!(seen <= cache.len(), "ciclo na lista");
        }
        assert_eq!(prev, cache.tail);
        assert_eq!(seen, cache.len());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let result = RecencyCache::<i32, i32>::new(0);
        assert!(matches!(result, Err(RecencyError::ZeroCapacity)));
    }

    #[test]
    fn test_get_returns_value() {
        let mut cache = cache(3);
        cache.put(1, 11);
        assert_eq!(cache.get(&1), Some(&11));
    }

    #[test]
    fn test_get_moves_entry_to_head() {
        let mut cache = cache(3);
        cache.put(1, 11);
        cache.put(2, 22);

        cache.get(&1);

        assert_eq!(cache.most_recent(), Some((&1, &11)));
        assert_eq!(cache.least_recent(), Some((&2, &22)));
        assert_invariants(&cache);
    }

    #[test]
    fn test_miss_returns_none_and_keeps_order() {
        let mut cache = cache(3);
        cache.put(1, 11);
        cache.put(2, 22);

        assert_eq!(cache.get(&3), None);
        assert_eq!(order(&cache), vec![2, 1]);
    }

    #[test]
    fn test_negative_values_are_not_a_miss() {
        let mut cache = cache(2);
        cache.put(1, -1);
        assert_eq!(cache.get(&1), Some(&-1));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_put_updates_value_in_place() {
        let mut cache = cache(3);
        cache.put(1, 11);
        cache.put(1, 22);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&1), Some(&22));
    }

    #[test]
    fn test_update_moves_to_head_without_eviction() {
        let mut cache = cache(3);
        cache.put(1, 11);
        cache.put(2, 22);
        cache.put(3, 33);

        assert_eq!(cache.push(1, 111), None);

        assert_eq!(cache.most_recent(), Some((&1, &111)));
        assert_eq!(order(&cache), vec![1, 3, 2]);
        assert_eq!(cache.stats().evictions, 0);
        assert_invariants(&cache);
    }

    #[test]
    fn test_new_key_becomes_head() {
        let mut cache = cache(3);
        cache.put(1, 11);
        cache.put(2, 22);
        cache.put(3, 33);

        assert_eq!(cache.most_recent(), Some((&3, &33)));
        assert_eq!(cache.get(&3), Some(&33));
    }

    #[test]
    fn test_eviction_removes_tail() {
        let mut cache = cache(3);
        cache.put(1, 11);
        cache.put(2, 22);
        cache.put(3, 33);

        let evicted = cache.push(4, 44);

        assert_eq!(evicted, Some((1, 11)));
        assert_eq!(cache.least_recent(), Some((&2, &22)));
        assert_eq!(order(&cache), vec![4, 3, 2]);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&22));
        assert_eq!(cache.get(&3), Some(&33));
        assert_eq!(cache.get(&4), Some(&44));
        assert_invariants(&cache);
    }

    #[test]
    fn test_get_protects_entry_from_eviction() {
        let mut cache = cache(2);
        cache.put(1, 11);
        cache.put(2, 22);
        cache.get(&1);
        cache.put(3, 33);

        assert_eq!(cache.get(&1), Some(&11));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), Some(&33));
    }

    #[test]
    fn test_capacity_one() {
        let mut cache = cache(1);
        cache.put(1, 11);
        assert_eq!(cache.push(2, 22), Some((1, 11)));
        assert_eq!(cache.push(2, 23), None);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.most_recent(), cache.least_recent());
        assert_eq!(cache.peek(&2), Some(&23));
        assert_invariants(&cache);
    }

    #[test]
    fn test_put_of_get_is_a_touch() {
        let mut cache = cache(3);
        cache.put(1, 11);
        cache.put(2, 22);
        cache.put(3, 33);

        let value = *cache.peek(&1).unwrap();
        cache.put(1, value);

        assert_eq!(cache.peek(&1), Some(&11));
        assert_eq!(order(&cache), vec![1, 3, 2]);
    }

    #[test]
    fn test_peek_and_contains_do_not_touch() {
        let mut cache = cache(2);
        cache.put(1, 11);
        cache.put(2, 22);

        assert_eq!(cache.peek(&1), Some(&11));
        assert!(cache.contains(&1));
        assert!(!cache.contains(&9));
        assert_eq!(order(&cache), vec![2, 1]);

        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, 0);
    }

    #[test]
    fn test_iter_both_directions() {
        let mut cache = cache(4);
        for key in 1..=4 {
            cache.put(key, key * 10);
        }
        cache.get(&2);

        let forward: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
        let backward: Vec<_> = cache.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(forward, vec![2, 4, 3, 1]);
        assert_eq!(backward, vec![1, 3, 4, 2]);

        let mut iter = cache.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some((&2, &20)));
        assert_eq!(iter.next_back(), Some((&1, &10)));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some((&4, &40)));
        assert_eq!(iter.next_back(), Some((&3, &30)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_clear() {
        let mut cache = cache(2);
        cache.put(1, 11);
        cache.put(2, 22);
        cache.get(&1);

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.most_recent(), None);
        assert_eq!(cache.least_recent(), None);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.stats().hits, 1);

        cache.put(3, 33);
        assert_eq!(order(&cache), vec![3]);
        assert_invariants(&cache);
    }

    #[test]
    fn test_stats() {
        let mut cache = cache(2);
        cache.put(1, 11);

        cache.get(&1); // Hit
        cache.get(&2); // Miss
        cache.get(&1); // Hit
        cache.put(2, 22);
        cache.put(3, 33);

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.capacity, 2);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert!((stats.hit_rate() - 0.666).abs() < 0.01);
        assert!(cache.is_full());
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut cache: RecencyCache<String, usize> = RecencyCache::new(2).unwrap();
        cache.put("alpha".to_string(), 1);
        cache.put("beta".to_string(), 2);

        assert_eq!(cache.get("alpha"), Some(&1));
        assert!(cache.contains("beta"));
        assert_eq!(cache.peek("gamma"), None);
    }

    #[test]
    fn test_display_in_recency_order() {
        let mut cache = cache(3);
        cache.put(1, 11);
        cache.put(2, 22);
        cache.get(&1);

        assert_eq!(cache.to_string(), "[1, 11]\n[2, 22]\n");
        assert_eq!(format!("{:?}", cache), "{1: 11, 2: 22}");
    }
}

#[cfg(test)]
mod property_tests {
    use super::tests::assert_invariants;
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Get(u8),
        Put(u8, u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..16).prop_map(Op::Get),
            (0u8..16, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        ]
    }

    /// Modelo ingênuo: vetor da entrada mais recente para a menos recente.
    fn model_touch(model: &mut Vec<(u8, u32)>, key: u8) -> Option<u32> {
        let pos = model.iter().position(|(k, _)| *k == key)?;
        let entry = model.remove(pos);
        model.insert(0, entry);
        Some(entry.1)
    }

    proptest! {
        #[test]
        fn prop_len_within_capacity(
            capacity in 1usize..20,
            ops in prop::collection::vec((0u8..64, any::<u32>()), 0..200)
        ) {
            let mut cache = RecencyCache::new(capacity).unwrap();
            for (key, value) in ops {
                cache.put(key, value);
                prop_assert!(cache.len() <= cache.capacity());
            }
        }

        #[test]
        fn prop_matches_model(
            capacity in 1usize..8,
            ops in prop::collection::vec(op(), 0..200)
        ) {
            let mut cache: RecencyCache<u8, u32> = RecencyCache::new(capacity).unwrap();
            let mut model: Vec<(u8, u32)> = Vec::new();

            for op in ops {
                match op {
                    Op::Get(key) => {
                        let expected = model_touch(&mut model, key);
                        prop_assert_eq!(cache.get(&key).copied(), expected);
                    }
                    Op::Put(key, value) => {
                        let expected_eviction = if model_touch(&mut model, key).is_some() {
                            model[0].1 = value;
                            None
                        } else {
                            let evicted = if model.len() == capacity { model.pop() } else { None };
                            model.insert(0, (key, value));
                            evicted
                        };
                        prop_assert_eq!(cache.push(key, value), expected_eviction);
                    }
                }

                assert_invariants(&cache);
                let actual: Vec<(u8, u32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(&actual, &model);
            }
        }

        #[test]
        fn prop_eviction_only_touches_tail(
            capacity in 1usize..10,
            keys in prop::collection::vec(0u8..32, 1..60),
            fresh in 100u8..200
        ) {
            let mut cache = RecencyCache::new(capacity).unwrap();
            for key in keys {
                cache.put(key, u32::from(key) * 10);
            }
            prop_assume!(cache.is_full());

            let before: Vec<(u8, u32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            let evicted = cache.push(fresh, 0);

            prop_assert_eq!(evicted, before.last().copied());
            let after: Vec<(u8, u32)> = cache.iter().skip(1).map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(&after[..], &before[..before.len() - 1]);
        }

        #[test]
        fn prop_miss_keeps_order(
            capacity in 1usize..10,
            keys in prop::collection::vec(0u8..32, 0..40),
            absent in 100u8..200
        ) {
            let mut cache = RecencyCache::new(capacity).unwrap();
            for key in keys {
                cache.put(key, 0u32);
            }
            let before: Vec<u8> = cache.keys().copied().collect();

            prop_assert_eq!(cache.get(&absent), None);

            let after: Vec<u8> = cache.keys().copied().collect();
            prop_assert_eq!(before, after);
        }
    }
}
