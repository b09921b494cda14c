//! Pure normalization of Brazilian identifier strings.
//!
//! Each formatter strips non-digits first; input of an unexpected digit
//! count passes through digit-stripped, with no error raised.

use crate::types::Submission;

/// Strip every non-digit character.
pub fn digits_only(v: &str) -> String {
    v.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Individual tax ID (CPF): 11 digits → `XXX.XXX.XXX-XX`.
pub fn format_cpf(v: &str) -> String {
    let d = digits_only(v);
    if d.len() == 11 {
        format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..])
    } else {
        d
    }
}

/// Company tax ID (CNPJ): 14 digits → `XX.XXX.XXX/XXXX-XX`.
pub fn format_cnpj(v: &str) -> String {
    let d = digits_only(v);
    if d.len() == 14 {
        format!(
            "{}.{}.{}/{}-{}",
            &d[..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..]
        )
    } else {
        d
    }
}

/// Postal code (CEP): 8 digits → `XX.XXX-XXX`.
pub fn format_cep(v: &str) -> String {
    let d = digits_only(v);
    if d.len() == 8 {
        format!("{}.{}-{}", &d[..2], &d[2..5], &d[5..])
    } else {
        d
    }
}

/// Normalize the four identifier-like fields in place. Fields that are
/// absent or empty are left untouched.
pub fn normalize_identifiers(submission: &mut Submission) {
    let formatters: [(&str, fn(&str) -> String); 4] = [
        ("cnpj", format_cnpj),
        ("cpf", format_cpf),
        ("cep", format_cep),
        ("cepSocio", format_cep),
    ];
    for (field, formatter) in formatters {
        let raw = submission.text(field);
        if !raw.is_empty() {
            submission.set_text(field, formatter(&raw));
        }
    }
}

/// Deduplication fingerprint: join (cnpj, razaoSocial, emailEmpresa) and
/// drop every non-alphanumeric character.
pub fn fingerprint(cnpj: &str, razao_social: &str, email: &str) -> String {
    format!("{cnpj}_{razao_social}_{email}")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cpf_formats_11_digits() {
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
        assert_eq!(format_cpf("123.456.789-01"), "123.456.789-01");
        assert_eq!(format_cpf("123 456 789 01"), "123.456.789-01");
    }

    #[test]
    fn cnpj_formats_14_digits() {
        assert_eq!(format_cnpj("12345678000199"), "12.345.678/0001-99");
        assert_eq!(format_cnpj("12.345.678/0001-99"), "12.345.678/0001-99");
    }

    #[test]
    fn cep_formats_8_digits() {
        assert_eq!(format_cep("01310100"), "01.310-100");
        assert_eq!(format_cep("01310-100"), "01.310-100");
    }

    #[test]
    fn unexpected_lengths_pass_through_digit_stripped() {
        assert_eq!(format_cpf("123456"), "123456");
        assert_eq!(format_cnpj("abc123"), "123");
        assert_eq!(format_cep("123456789"), "123456789");
        assert_eq!(format_cpf(""), "");
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_cnpj("12345678000199");
        assert_eq!(format_cnpj(&once), once);
        let cep = format_cep("01310100");
        assert_eq!(format_cep(&cep), cep);
    }

    #[test]
    fn fingerprint_keeps_only_alphanumerics() {
        assert_eq!(
            fingerprint("12.345.678/0001-99", "Acme Ltda", "a@a.com"),
            "12345678000199AcmeLtdaaacom"
        );
        assert_eq!(fingerprint("", "", ""), "");
    }

    #[test]
    fn normalize_touches_only_present_fields() {
        let mut sub: Submission = serde_json::from_value(json!({
            "cnpj": "12345678000199",
            "cpf": "12345678901",
            "cep": "01310100"
        }))
        .unwrap();
        normalize_identifiers(&mut sub);
        assert_eq!(sub.text("cnpj"), "12.345.678/0001-99");
        assert_eq!(sub.text("cpf"), "123.456.789-01");
        assert_eq!(sub.text("cep"), "01.310-100");
        // cepSocio was absent and stays absent
        assert_eq!(sub.text("cepSocio"), "");
    }
}
