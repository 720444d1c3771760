//! Holder aggregation and the CSV export dialect.
//!
//! Ownership records are folded page by page into a [`HolderAggregate`]:
//! one count per owner, with the zero address (burned or unminted tokens)
//! kept out of the holder list.
//!
//! # CSV dialect
//!
//! ```text
//! address,quantity
//! 0x1111111111111111111111111111111111111111,2
//! 0x2222222222222222222222222222222222222222,1
//! ```
//!
//! Header always present, comma separated, `\n` terminated, rows sorted by
//! address so identical chain state always produces identical bytes.

use alloy_primitives::Address;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::num::NonZeroU64;

use crate::contracts::HolderSource;
use crate::error::{ExportError, ExportResult};
use crate::models::NftRecord;

/// Header row of the export.
pub const CSV_HEADER: [&str; 2] = ["address", "quantity"];

/// Token ids fetched per page.
pub const DEFAULT_PAGE_SIZE: NonZeroU64 = match NonZeroU64::new(100) {
    Some(n) => n,
    None => unreachable!(),
};

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u64 = 1000;

/// One row of the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Holder {
    pub address: Address,
    pub quantity: u64,
}

/// Token count per owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolderAggregate {
    counts: BTreeMap<Address, u64>,
    burned: u64,
}

impl HolderAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one token for its owner.
    pub fn record(&mut self, record: &NftRecord) {
        if record.is_burned() {
            self.burned += 1;
        } else {
            *self.counts.entry(record.owner).or_insert(0) += 1;
        }
    }

    /// Tokens owned by `owner`.
    pub fn get(&self, owner: &Address) -> Option<u64> {
        self.counts.get(owner).copied()
    }

    /// Number of distinct holders.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tokens owned by the zero address.
    pub fn burned(&self) -> u64 {
        self.burned
    }

    /// Tokens owned by real holders.
    pub fn total_held(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Holders in address order.
    pub fn iter(&self) -> impl Iterator<Item = Holder> + '_ {
        self.counts
            .iter()
            .map(|(&address, &quantity)| Holder { address, quantity })
    }

    pub fn holders(&self) -> Vec<Holder> {
        self.iter().collect()
    }

    /// Write the export CSV to `writer`.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        wtr.write_record(CSV_HEADER)?;
        for holder in self.iter() {
            wtr.write_record([holder.address.to_string(), holder.quantity.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// The export CSV as bytes.
    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }
}

impl Extend<NftRecord> for HolderAggregate {
    fn extend<I: IntoIterator<Item = NftRecord>>(&mut self, iter: I) {
        for record in iter {
            self.record(&record);
        }
    }
}

impl FromIterator<NftRecord> for HolderAggregate {
    fn from_iter<I: IntoIterator<Item = NftRecord>>(iter: I) -> Self {
        let mut aggregate = Self::new();
        aggregate.extend(iter);
        aggregate
    }
}

/// Read every token's owner from `source`, one page at a time.
///
/// `contract` is only used to label a [`ExportError::NoTokens`] result.
/// Pages are requested sequentially and folded into the aggregate as
/// they arrive, so memory grows with the number of holders rather than
/// the number of tokens.
pub async fn collect_holders<S: HolderSource>(
    source: &S,
    contract: Address,
    page_size: NonZeroU64,
) -> ExportResult<HolderAggregate> {
    let count = source.token_count().await?;
    if count == 0 {
        return Err(ExportError::NoTokens(contract));
    }

    log::info!("🔎 Reading owners of {} tokens from {}", count, contract);

    let mut aggregate = HolderAggregate::new();
    let mut start = 0;
    while start < count {
        let end = start.saturating_add(page_size.get()).min(count);
        let page = source.records(start..end).await?;
        log::debug!("   tokens {}..{}: {} records", start, end, page.len());
        aggregate.extend(page);
        start = end;
    }

    log::info!(
        "📊 {} holders own {} tokens ({} burned)",
        aggregate.len(),
        aggregate.total_held(),
        aggregate.burned()
    );

    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChainResult;
    use std::cell::RefCell;
    use std::ops::Range;

    const A: Address = Address::repeat_byte(0xaa);
    const B: Address = Address::repeat_byte(0x11);

    fn records(owners: &[Address]) -> Vec<NftRecord> {
        owners
            .iter()
            .enumerate()
            .map(|(id, owner)| NftRecord::new(id as u64, *owner))
            .collect()
    }

    struct VecSource {
        owners: Vec<Address>,
        pages: RefCell<Vec<Range<u64>>>,
    }

    impl VecSource {
        fn new(owners: Vec<Address>) -> Self {
            Self {
                owners,
                pages: RefCell::new(Vec::new()),
            }
        }
    }

    impl HolderSource for VecSource {
        async fn token_count(&self) -> ChainResult<u64> {
            Ok(self.owners.len() as u64)
        }

        async fn records(&self, ids: Range<u64>) -> ChainResult<Vec<NftRecord>> {
            self.pages.borrow_mut().push(ids.clone());
            Ok(ids
                .map(|id| NftRecord::new(id, self.owners[id as usize]))
                .collect())
        }
    }

    #[test]
    fn test_aggregate_excludes_zero_address() {
        let aggregate: HolderAggregate = records(&[A, A, B, Address::ZERO]).into_iter().collect();

        assert_eq!(aggregate.len(), 2);
        assert_eq!(aggregate.get(&A), Some(2));
        assert_eq!(aggregate.get(&B), Some(1));
        assert_eq!(aggregate.get(&Address::ZERO), None);
        assert_eq!(aggregate.burned(), 1);
        assert_eq!(aggregate.total_held(), 3);
    }

    #[test]
    fn test_csv_rows() {
        let aggregate: HolderAggregate = records(&[A, A, B]).into_iter().collect();
        let csv = String::from_utf8(aggregate.to_csv().unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "address,quantity");
        let rows = &lines[1..];
        assert_eq!(rows.len(), 2);
        for row in rows {
            let (address, quantity) = row.split_once(',').unwrap();
            assert!(address.starts_with("0x") && address.len() == 42);
            assert!(quantity.chars().all(|c| c.is_ascii_digit()));
        }
        assert!(rows.contains(&format!("{},2", A).as_str()));
        assert!(rows.contains(&format!("{},1", B).as_str()));
    }

    #[test]
    fn test_csv_sorted_and_newline_terminated() {
        // B sorts before A (0x11.. < 0xaa..) regardless of first-seen order
        let aggregate: HolderAggregate = records(&[A, B, A]).into_iter().collect();
        let csv = String::from_utf8(aggregate.to_csv().unwrap()).unwrap();

        let expected = format!("address,quantity\n{},1\n{},2\n", B, A);
        assert_eq!(csv, expected);
        assert!(!csv.contains('\r'));
    }

    #[test]
    fn test_csv_deterministic() {
        let first: HolderAggregate = records(&[A, B, A, B, B]).into_iter().collect();
        let second: HolderAggregate = records(&[B, B, A, B, A]).into_iter().collect();

        assert_eq!(first.to_csv().unwrap(), second.to_csv().unwrap());
    }

    #[test]
    fn test_all_burned_is_header_only() {
        let aggregate: HolderAggregate = records(&[Address::ZERO, Address::ZERO]).into_iter().collect();

        assert!(aggregate.is_empty());
        assert_eq!(aggregate.to_csv().unwrap(), b"address,quantity\n");
    }

    #[tokio::test]
    async fn test_collect_in_pages() {
        let source = VecSource::new(vec![A, B, A, Address::ZERO, B, A, A]);

        let aggregate = collect_holders(&source, A, NonZeroU64::new(3).unwrap())
            .await
            .unwrap();

        assert_eq!(*source.pages.borrow(), vec![0..3, 3..6, 6..7]);
        assert_eq!(aggregate.get(&A), Some(4));
        assert_eq!(aggregate.get(&B), Some(2));
        assert_eq!(aggregate.burned(), 1);
    }

    #[tokio::test]
    async fn test_collect_without_tokens() {
        let source = VecSource::new(Vec::new());

        let err = collect_holders(&source, A, DEFAULT_PAGE_SIZE).await.unwrap_err();

        assert!(matches!(err, ExportError::NoTokens(addr) if addr == A));
        assert!(source.pages.borrow().is_empty());
    }
}
