//! Document artifact generation: duplicate the fixed template, substitute
//! every placeholder token, export to the binary document format, store the
//! blob, trash the working copy.

use anyhow::{Context, Result};
use tracing::info;

use crate::traits::{BlobStore, DocTemplate};
use crate::types::Submission;

/// Placeholder tokens recognized in the template body, each wrapped as
/// `{token}`. Tokens for absent fields substitute to the empty string.
pub const DOC_TOKENS: [&str; 29] = [
    "razaoSocial",
    "cnpj",
    "cep",
    "endereco",
    "bairro",
    "cidade",
    "uf",
    "telefone",
    "celular",
    "emailEmpresa",
    "banco",
    "agencia",
    "conta",
    "pix",
    "nomeSocio",
    "cpf",
    "rg",
    "orgaoExpedidor",
    "dataEmissao",
    "nascimento",
    "nacionalidade",
    "estadoCivil",
    "profissao",
    "emailSocio",
    "cepSocio",
    "enderecoSocio",
    "bairroSocio",
    "cidadeSocio",
    "ufSocio",
];

/// Generate the document artifact `"{base}.docx"` for a submission.
pub async fn generate_document<T, B>(templates: &T, blobs: &B, submission: &Submission) -> Result<()>
where
    T: DocTemplate + ?Sized,
    B: BlobStore + ?Sized,
{
    let base = submission.base_name();
    let handle = templates
        .duplicate(&base)
        .await
        .context("duplicating document template")?;

    for token in DOC_TOKENS {
        templates
            .replace_all(&handle, &format!("{{{token}}}"), &submission.text(token))
            .await
            .with_context(|| format!("substituting token {{{token}}}"))?;
    }
    templates
        .save_close(&handle)
        .await
        .context("finalizing working copy")?;

    let bytes = templates
        .export_docx(&handle)
        .await
        .context("exporting document")?;
    blobs
        .create_file(&format!("{base}.docx"), &bytes)
        .await
        .context("storing document artifact")?;

    templates
        .trash(&handle)
        .await
        .context("trashing working copy")?;

    info!("generated document artifact {base}.docx");
    Ok(())
}
