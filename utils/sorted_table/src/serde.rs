use alloc::vec::Vec;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize};

use crate::{SortedTable, TableEntry};

impl Serialize for SortedTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for entry in self.iter() {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

struct SortedTableDeserializer;

impl<'de> Visitor<'de> for SortedTableDeserializer {
    type Value = SortedTable;

    fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
        formatter.write_str("A sorted sequence of entries for SortedTable")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let capacity = seq.size_hint().unwrap_or(0);
        let mut keys = Vec::with_capacity(capacity);
        let mut offsets = Vec::with_capacity(capacity);

        while let Some(entry) = seq.next_element::<TableEntry>()? {
            keys.push(entry.key);
            offsets.push(entry.offset);
        }

        SortedTable::from_sorted_parts(keys, offsets).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for SortedTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SortedTableDeserializer)
    }
}
