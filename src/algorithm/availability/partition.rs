//! Grouping of an indicator's records by its active dimensions.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::algorithm::availability::validity::ActiveDimensions;
use crate::models::{DimensionSlot, Record};

/// Fixed-arity grouping key: one slot per configured dimension.
///
/// Inactive dimensions are always [`DimensionSlot::NotDisaggregated`], so
/// records that differ only on inactive dimensions share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    slots: SmallVec<[DimensionSlot; 8]>,
}

impl PartitionKey {
    /// Key of `record` under the given active dimensions
    #[must_use]
    pub fn for_record(record: &Record, active: &ActiveDimensions) -> Self {
        let slots = (0..active.len())
            .map(|idx| {
                if active.is_active(idx) {
                    record
                        .dimension(idx)
                        .map_or(DimensionSlot::Missing, |v| DimensionSlot::Value(v.to_string()))
                } else {
                    DimensionSlot::NotDisaggregated
                }
            })
            .collect();

        Self { slots }
    }

    /// Slots in configured dimension order
    #[must_use]
    pub fn slots(&self) -> &[DimensionSlot] {
        &self.slots
    }

    /// Consume the key into its slots
    #[must_use]
    pub fn into_slots(self) -> Vec<DimensionSlot> {
        self.slots.into_vec()
    }
}

/// The records of one indicator sharing a partition key
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    /// Indicator the partition belongs to
    pub indicator: &'a str,
    /// Values of every dimension for this partition
    pub key: PartitionKey,
    /// Member records, in input order
    pub records: Vec<&'a Record>,
}

/// Split one indicator's records into partitions.
///
/// Partitions are emitted in the order their key first appears. Every record
/// lands in exactly one partition; a null value on an active dimension is a
/// category of its own.
#[must_use]
pub fn partition_records<'a>(
    indicator: &'a str,
    records: &[&'a Record],
    active: &ActiveDimensions,
) -> Vec<Partition<'a>> {
    let mut positions: FxHashMap<PartitionKey, usize> = FxHashMap::default();
    let mut partitions: Vec<Partition<'a>> = Vec::new();

    for &record in records {
        let key = PartitionKey::for_record(record, active);
        if let Some(&pos) = positions.get(&key) {
            partitions[pos].records.push(record);
        } else {
            positions.insert(key.clone(), partitions.len());
            partitions.push(Partition {
                indicator,
                key,
                records: vec![record],
            });
        }
    }

    partitions
}
