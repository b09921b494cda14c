//! Spreadsheet artifact generation: a per-submission key/value table with
//! one row per scalar field, exported to the binary spreadsheet format.

use anyhow::{Context, Result};
use tracing::info;

use crate::traits::{BlobStore, Workbook};
use crate::types::Submission;

/// Generate the spreadsheet artifact `"{base}.xlsx"` for a submission.
///
/// Structured field values are skipped, a guard against unexpectedly
/// nested payload shapes.
pub async fn export_workbook<W, B>(workbooks: &W, blobs: &B, submission: &Submission) -> Result<()>
where
    W: Workbook + ?Sized,
    B: BlobStore + ?Sized,
{
    let base = submission.base_name();
    let handle = workbooks
        .create(&base)
        .await
        .context("creating working workbook")?;

    workbooks
        .append_row(&handle, &["CAMPO".to_string(), "VALOR".to_string()])
        .await
        .context("writing header row")?;
    for (field, value) in submission.scalar_fields() {
        workbooks
            .append_row(&handle, &[field.to_string(), value])
            .await
            .with_context(|| format!("writing row for field {field}"))?;
    }
    workbooks.flush(&handle).await.context("flushing workbook")?;

    let bytes = workbooks
        .export_xlsx(&handle)
        .await
        .context("exporting workbook")?;
    blobs
        .create_file(&format!("{base}.xlsx"), &bytes)
        .await
        .context("storing spreadsheet artifact")?;

    workbooks
        .trash(&handle)
        .await
        .context("trashing working workbook")?;

    info!("generated spreadsheet artifact {base}.xlsx");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob_store::MockBlobStore;
    use crate::workbook::MockWorkbook;
    use serde_json::json;

    #[tokio::test]
    async fn rows_cover_scalar_fields_with_header_first() -> Result<()> {
        let workbooks = MockWorkbook::new();
        let blobs = MockBlobStore::new();
        let submission: Submission = serde_json::from_value(json!({
            "razaoSocial": "Acme",
            "cnpj": "123",
            "extras": {"nested": true},
            "agencia": 42
        }))
        .unwrap();

        export_workbook(&workbooks, &blobs, &submission).await?;

        let exports = workbooks.get_exports();
        assert_eq!(exports.len(), 1);
        let (name, rows) = &exports[0];
        assert_eq!(name, "Acme - 123");
        assert_eq!(
            rows,
            &vec![
                vec!["CAMPO".to_string(), "VALOR".to_string()],
                vec!["razaoSocial".to_string(), "Acme".to_string()],
                vec!["cnpj".to_string(), "123".to_string()],
                vec!["agencia".to_string(), "42".to_string()],
            ]
        );

        assert!(blobs.file_bytes("Acme - 123.xlsx").is_some());
        assert_eq!(workbooks.live_books(), 0);
        assert_eq!(workbooks.trashed_names(), vec!["Acme - 123".to_string()]);
        Ok(())
    }
}
