use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Ordered `(key, value)` rows produced by one aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<K, V> {
    rows: Vec<(K, V)>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Table { rows: vec![] }
    }
}

impl<K, V> Table<K, V> {
    pub fn new(rows: Vec<(K, V)>) -> Self {
        Table { rows }
    }

    pub fn rows(&self) -> &[(K, V)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.rows.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.rows.iter().map(|(_, v)| v)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.rows.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn into_rows(self) -> Vec<(K, V)> {
        self.rows
    }
}

impl<K, V> Table<K, V>
where
    V: Copy + Sum<V>,
{
    pub fn total(&self) -> V {
        self.rows.iter().map(|(_, v)| *v).sum()
    }
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash + Clone,
    V: AddAssign + Default,
{
    /// Group `items` by `key`, summing `value`. Rows keep the order in which
    /// each key first appears.
    pub fn group_sum<T, I, FK, FV>(items: I, key: FK, value: FV) -> Self
    where
        I: IntoIterator<Item = T>,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> V,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut rows: Vec<(K, V)> = vec![];

        for item in items {
            let k = key(&item);
            let v = value(&item);
            match index.get(&k) {
                Some(&i) => rows[i].1 += v,
                None => {
                    index.insert(k.clone(), rows.len());
                    rows.push((k, v));
                }
            }
        }
        Table { rows }
    }
}

/// Rows serialize as `{"key": .., "value": ..}` objects, keeping order.
impl<K: Serialize, V: Serialize> Serialize for Table<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Row<'r, A, B> {
            key: &'r A,
            value: &'r B,
        }

        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for (key, value) in &self.rows {
            seq.serialize_element(&Row { key, value })?;
        }
        seq.end()
    }
}

/// Casual and registered rentals side by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiderSplit {
    pub casual: u64,
    pub registered: u64,
}

impl RiderSplit {
    pub fn new(casual: u64, registered: u64) -> Self {
        RiderSplit { casual, registered }
    }

    pub fn total(&self) -> u64 {
        self.casual + self.registered
    }
}

impl Add for RiderSplit {
    type Output = RiderSplit;

    fn add(self, rhs: Self) -> Self::Output {
        RiderSplit {
            casual: self.casual + rhs.casual,
            registered: self.registered + rhs.registered,
        }
    }
}

impl AddAssign for RiderSplit {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for RiderSplit {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(RiderSplit::default(), Add::add)
    }
}
