use std::marker::PhantomData;

use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::{OrderedMap, OrderedSet};

impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Serialize + Ord,
    V: Serialize,
{
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = s.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<K, V> {
    pd: PhantomData<(K, V)>,
}

impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map with ordered keys")
    }

    fn visit_map<M>(self, mut access: M) -> Result<OrderedMap<K, V>, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map = OrderedMap::new();

        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }

        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(d: D) -> Result<OrderedMap<K, V>, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_map(OrderedMapVisitor { pd: PhantomData })
    }
}

impl<T> Serialize for OrderedSet<T>
where
    T: Serialize + Ord,
{
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = s.serialize_seq(Some(self.len()))?;
        for member in self.iter() {
            seq.serialize_element(member)?;
        }
        seq.end()
    }
}

struct OrderedSetVisitor<T> {
    pd: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for OrderedSetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = OrderedSet<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence of ordered members")
    }

    fn visit_seq<S>(self, mut access: S) -> Result<OrderedSet<T>, S::Error>
    where
        S: SeqAccess<'de>,
    {
        let mut set = OrderedSet::new();

        while let Some(member) = access.next_element()? {
            set.insert(member);
        }

        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for OrderedSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(d: D) -> Result<OrderedSet<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_seq(OrderedSetVisitor { pd: PhantomData })
    }
}
