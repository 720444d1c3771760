//! Holder export entry point.
//!
//! ```text
//! resolve(contract) ──None──▶ ContractNotFound
//!      │
//!      ▼
//! collect_holders (paged ownerOf) ──0 tokens──▶ NoTokens
//!      │
//!      ▼
//! CSV ──▶ output file (overwritten)
//! ```

use alloy_primitives::Address;
use serde::Serialize;
use std::fs;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use mutant_mint_core::{collect_holders, ContractResolver, HolderAggregate, HolderSource};

use crate::error::{ExportError, ExportResult};

/// What an export run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub contract: Address,
    pub output: PathBuf,
    pub holders: usize,
    pub tokens_held: u64,
    pub burned: u64,
}

/// Resolve `contract` and read its full holder aggregate.
pub async fn snapshot_holders<R>(
    resolver: &R,
    contract: Address,
    page_size: NonZeroU64,
) -> ExportResult<HolderAggregate>
where
    R: ContractResolver,
    R::Handle: HolderSource,
{
    let handle = resolver
        .resolve(contract)
        .await?
        .ok_or(ExportError::ContractNotFound(contract))?;

    collect_holders(&handle, contract, page_size).await
}

/// Export the holders of `contract` as CSV into `output`.
///
/// The file is only touched once the whole snapshot has been read, so a
/// failed run leaves any previous export in place.
pub async fn export_holders<R>(
    resolver: &R,
    contract: Address,
    output: &Path,
    page_size: NonZeroU64,
) -> ExportResult<ExportSummary>
where
    R: ContractResolver,
    R::Handle: HolderSource,
{
    log::info!("📦 Exporting holders of {} to {}", contract, output.display());

    let aggregate = snapshot_holders(resolver, contract, page_size).await?;
    let csv = aggregate.to_csv()?;
    fs::write(output, csv)?;

    log::info!("✅ Wrote {} holders to {}", aggregate.len(), output.display());

    Ok(ExportSummary {
        contract,
        output: output.to_path_buf(),
        holders: aggregate.len(),
        tokens_held: aggregate.total_held(),
        burned: aggregate.burned(),
    })
}
