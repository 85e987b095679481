/*!
 * Partition Map Rendering
 * Fixed-width box drawing of the partition list, for logs only
 */

use super::partition::PartitionList;
use crate::core::limits::PARTITION_MAP_SIZE_WIDTH;
use std::fmt;

/// Display adapter drawing one box row per partition
///
/// Occupied partitions carry a check mark, free ones a blank:
///
/// ```text
/// ┌────────┐
/// │ ✓   50 │
/// ├────────┤
/// │     40 │
/// └────────┘
/// ```
pub struct PartitionMap<'a> {
    list: &'a PartitionList,
}

impl<'a> PartitionMap<'a> {
    pub fn new(list: &'a PartitionList) -> Self {
        Self { list }
    }
}

impl fmt::Display for PartitionMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = "─".repeat(PARTITION_MAP_SIZE_WIDTH + 4);
        writeln!(f, "┌{}┐", inner)?;
        for (index, (_, part)) in self.list.iter().enumerate() {
            if index > 0 {
                writeln!(f, "├{}┤", inner)?;
            }
            let mark = if part.is_free { " " } else { "✓" };
            writeln!(
                f,
                "│ {} {:>width$} │",
                mark,
                part.size,
                width = PARTITION_MAP_SIZE_WIDTH
            )?;
        }
        write!(f, "└{}┘", inner)
    }
}
