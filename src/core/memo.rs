/// Single-slot cache that recomputes only when its key changes.
#[derive(Debug)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        match &self.entry {
            Some((cached_key, value)) if *cached_key == key => value.clone(),
            _ => {
                let value = compute(&key);
                self.entry = Some((key, value.clone()));
                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recomputes_only_on_key_change() {
        let mut memo = Memo::default();
        let mut calls = 0;

        let mut get = |memo: &mut Memo<(u32, String), u32>, key: (u32, String)| {
            memo.get_or_compute(key, |(n, _)| {
                calls += 1;
                n * 2
            })
        };

        assert_eq!(get(&mut memo, (1, "a".to_string())), 2);
        assert_eq!(get(&mut memo, (1, "a".to_string())), 2);
        assert_eq!(get(&mut memo, (1, "b".to_string())), 2);
        assert_eq!(get(&mut memo, (3, "b".to_string())), 6);
        assert_eq!(get(&mut memo, (1, "a".to_string())), 2);
        assert_eq!(calls, 4);
    }
}
