use chrono::NaiveDate;
use itertools::Itertools;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use super::codes::TransactionCode;
use super::error::{Diagnostic, DiagnosticKind, Form4Error};
use super::types::{
    AcquiredDisposed, DerivativeTerms, Filing, Footnote, Issuer, OwnerAddress, OwnershipNature,
    ReportingOwner, SecurityClass, Signature, Transaction,
};

/// Read a leaf value. Bare strings, `value`-wrapped leaves and
/// attribute-bearing text elements all collapse to their text content.
fn leaf(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => match map.get("value") {
            Some(inner) => leaf(inner),
            None => map.get("#text").and_then(Value::as_str),
        },
        _ => None,
    }
}

fn leaf_at<'a>(tree: &'a Value, name: &str) -> Option<&'a str> {
    tree.get(name).and_then(leaf).filter(|s| !s.is_empty())
}

fn require_leaf<'a>(tree: &'a Value, name: &str, path: &str) -> Result<&'a str, Form4Error> {
    leaf_at(tree, name).ok_or_else(|| Form4Error::missing(format!("{}.{}", path, name)))
}

fn parse_date(s: &str, path: &str) -> Result<NaiveDate, Form4Error> {
    // Some generators append a timezone suffix to plain dates.
    let s = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Form4Error::invalid(path, e))
}

fn parse_decimal(s: &str, path: &str) -> Result<Decimal, Form4Error> {
    let cleaned = s.replace(',', "");
    Decimal::from_str(&cleaned).map_err(|e| Form4Error::invalid(path, e))
}

fn optional_decimal(tree: &Value, name: &str, path: &str) -> Result<Option<Decimal>, Form4Error> {
    match leaf_at(tree, name) {
        Some(s) => parse_decimal(s, &format!("{}.{}", path, name)).map(Some),
        None => Ok(None),
    }
}

fn optional_date(tree: &Value, name: &str, path: &str) -> Result<Option<NaiveDate>, Form4Error> {
    match leaf_at(tree, name) {
        Some(s) => parse_date(s, &format!("{}.{}", path, name)).map(Some),
        None => Ok(None),
    }
}

fn flag(tree: &Value, name: &str) -> bool {
    matches!(leaf_at(tree, name), Some("1") | Some("true"))
}

/// Footnote references may hang off any sub-field of a line item; gather
/// every `footnoteId` in the subtree, first occurrence wins the ordering.
fn collect_footnote_ids(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(refs)) = map.get("footnoteId") {
                for r in refs {
                    if let Some(id) = r.get("@id").and_then(Value::as_str) {
                        out.push(id.to_string());
                    }
                }
            }
            for (key, child) in map {
                if key != "footnoteId" {
                    collect_footnote_ids(child, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_footnote_ids(item, out);
            }
        }
        _ => {}
    }
}

pub fn extract_issuers(tree: &Value) -> Result<Vec<Issuer>, Form4Error> {
    let blocks = tree
        .get("issuer")
        .and_then(Value::as_array)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| Form4Error::missing("issuer"))?;

    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let path = format!("issuer[{}]", i);
            Ok(Issuer {
                cik: require_leaf(block, "issuerCik", &path)?.to_string(),
                name: require_leaf(block, "issuerName", &path)?.to_string(),
                trading_symbol: leaf_at(block, "issuerTradingSymbol")
                    .filter(|s| !s.eq_ignore_ascii_case("none") && !s.eq_ignore_ascii_case("n/a"))
                    .map(str::to_string),
            })
        })
        .collect()
}

pub fn extract_reporting_owners(tree: &Value) -> Result<Vec<ReportingOwner>, Form4Error> {
    let blocks = tree
        .get("reportingOwner")
        .and_then(Value::as_array)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| Form4Error::missing("reportingOwner"))?;

    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let path = format!("reportingOwner[{}]", i);
            let id_path = format!("{}.reportingOwnerId", path);
            let id = block
                .get("reportingOwnerId")
                .ok_or_else(|| Form4Error::missing(id_path.clone()))?;

            let relationship = block.get("reportingOwnerRelationship");
            let is_officer = relationship.map_or(false, |r| flag(r, "isOfficer"));
            let officer_title = relationship
                .and_then(|r| leaf_at(r, "officerTitle"))
                .filter(|_| is_officer)
                .map(str::to_string);

            Ok(ReportingOwner {
                cik: require_leaf(id, "rptOwnerCik", &id_path)?.to_string(),
                name: require_leaf(id, "rptOwnerName", &id_path)?.to_string(),
                address: block.get("reportingOwnerAddress").map(|addr| OwnerAddress {
                    street1: leaf_at(addr, "rptOwnerStreet1").map(str::to_string),
                    street2: leaf_at(addr, "rptOwnerStreet2").map(str::to_string),
                    city: leaf_at(addr, "rptOwnerCity").map(str::to_string),
                    state: leaf_at(addr, "rptOwnerState").map(str::to_string),
                    zip: leaf_at(addr, "rptOwnerZipCode").map(str::to_string),
                }),
                is_director: relationship.map_or(false, |r| flag(r, "isDirector")),
                is_officer,
                is_ten_percent_owner: relationship.map_or(false, |r| flag(r, "isTenPercentOwner")),
                is_other: relationship.map_or(false, |r| flag(r, "isOther")),
                officer_title,
            })
        })
        .collect()
}

pub fn extract_non_derivative_transactions(
    tree: &Value,
    owner_cik: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Transaction>, Form4Error> {
    extract_transactions_from(
        tree.get("nonDerivativeTable"),
        "nonDerivativeTable",
        "nonDerivativeTransaction",
        owner_cik,
        false,
        diagnostics,
    )
}

pub fn extract_derivative_transactions(
    tree: &Value,
    owner_cik: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Transaction>, Form4Error> {
    extract_transactions_from(
        tree.get("derivativeTable"),
        "derivativeTable",
        "derivativeTransaction",
        owner_cik,
        true,
        diagnostics,
    )
}

fn extract_transactions_from(
    table: Option<&Value>,
    table_name: &str,
    element: &str,
    owner_cik: &str,
    derivative: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Transaction>, Form4Error> {
    // Absent table, or a table holding only position rows, is a valid filing.
    let rows = match table.and_then(|t| t.get(element)).and_then(Value::as_array) {
        Some(rows) => rows,
        None => return Ok(Vec::new()),
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let path = format!("{}.{}[{}]", table_name, element, i);

            let security_title = require_leaf(row, "securityTitle", &path)?.to_string();
            let transaction_date = parse_date(
                require_leaf(row, "transactionDate", &path)?,
                &format!("{}.transactionDate", path),
            )?;

            let coding_path = format!("{}.transactionCoding", path);
            let coding = row
                .get("transactionCoding")
                .ok_or_else(|| Form4Error::missing(coding_path.clone()))?;
            let raw_code = require_leaf(coding, "transactionCode", &coding_path)?;
            let code = TransactionCode::from_str(raw_code)
                .unwrap_or_else(|_| TransactionCode::Other(raw_code.to_string()));
            if !code.is_known() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnrecognizedTransactionCode,
                    format!("{}.transactionCode", coding_path),
                    format!("unrecognized transaction code {:?}, kept for manual review", raw_code),
                ));
            }

            let amounts_path = format!("{}.transactionAmounts", path);
            let amounts = row
                .get("transactionAmounts")
                .ok_or_else(|| Form4Error::missing(amounts_path.clone()))?;
            let acquired_disposed = AcquiredDisposed::from_str(require_leaf(
                amounts,
                "transactionAcquiredDisposedCode",
                &amounts_path,
            )?)
            .map_err(|e| {
                Form4Error::invalid(format!("{}.transactionAcquiredDisposedCode", amounts_path), e)
            })?;
            let shares = optional_decimal(amounts, "transactionShares", &amounts_path)?;
            // Absent price is valid (grants, awards) and distinct from zero.
            let price_per_share =
                optional_decimal(amounts, "transactionPricePerShare", &amounts_path)?;

            let shares_owned_following = match row.get("postTransactionAmounts") {
                Some(post) => optional_decimal(
                    post,
                    "sharesOwnedFollowingTransaction",
                    &format!("{}.postTransactionAmounts", path),
                )?,
                None => None,
            };

            let nature = row.get("ownershipNature");
            let ownership = match nature.and_then(|n| leaf_at(n, "directOrIndirectOwnership")) {
                Some(s) => OwnershipNature::from_str(s).map_err(|e| {
                    Form4Error::invalid(
                        format!("{}.ownershipNature.directOrIndirectOwnership", path),
                        e,
                    )
                })?,
                None => OwnershipNature::Direct,
            };
            let indirect_ownership_nature = nature
                .and_then(|n| leaf_at(n, "natureOfOwnership"))
                .map(str::to_string);

            let security_class = if derivative {
                let underlying = row.get("underlyingSecurity");
                SecurityClass::Derivative(DerivativeTerms {
                    underlying_title: underlying
                        .and_then(|u| leaf_at(u, "underlyingSecurityTitle"))
                        .map(str::to_string),
                    underlying_shares: match underlying {
                        Some(u) => optional_decimal(
                            u,
                            "underlyingSecurityShares",
                            &format!("{}.underlyingSecurity", path),
                        )?,
                        None => None,
                    },
                    conversion_or_exercise_price: optional_decimal(
                        row,
                        "conversionOrExercisePrice",
                        &path,
                    )?,
                    exercise_date: optional_date(row, "exerciseDate", &path)?,
                    expiration_date: optional_date(row, "expirationDate", &path)?,
                })
            } else {
                SecurityClass::NonDerivative
            };

            let mut footnote_ids = Vec::new();
            collect_footnote_ids(row, &mut footnote_ids);
            let footnote_ids = footnote_ids.into_iter().unique().collect();

            Ok(Transaction {
                owner_cik: owner_cik.to_string(),
                security_title,
                transaction_date,
                code,
                shares,
                price_per_share,
                acquired_disposed,
                shares_owned_following,
                ownership,
                indirect_ownership_nature,
                security_class,
                footnote_ids,
            })
        })
        .collect()
}

pub fn extract_footnotes(
    tree: &Value,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Footnote>, Form4Error> {
    let notes = match tree
        .get("footnotes")
        .and_then(|f| f.get("footnote"))
        .and_then(Value::as_array)
    {
        Some(notes) => notes,
        None => return Ok(Vec::new()),
    };

    let mut out: Vec<Footnote> = Vec::new();
    for (i, note) in notes.iter().enumerate() {
        let path = format!("footnotes.footnote[{}]", i);
        let id = note
            .get("@id")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Form4Error::missing(format!("{}.id", path)))?
            .to_string();
        let text = note
            .get("#text")
            .and_then(Value::as_str)
            .map(|t| html_escape::decode_html_entities(t).into_owned())
            .unwrap_or_default();

        if let Some(existing) = out.iter_mut().find(|f| f.id == id) {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::DuplicateFootnoteId,
                path,
                format!("duplicate footnote id {}, last occurrence wins", id),
            ));
            existing.text = text;
        } else {
            out.push(Footnote { id, text });
        }
    }
    Ok(out)
}

pub fn extract_signatures(tree: &Value) -> Result<Vec<Signature>, Form4Error> {
    let blocks = tree
        .get("ownerSignature")
        .and_then(Value::as_array)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| Form4Error::missing("ownerSignature"))?;

    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let path = format!("ownerSignature[{}]", i);
            Ok(Signature {
                name: require_leaf(block, "signatureName", &path)?.to_string(),
                date: parse_date(
                    require_leaf(block, "signatureDate", &path)?,
                    &format!("{}.signatureDate", path),
                )?,
            })
        })
        .collect()
}

/// Assemble the complete filing from a normalized tree, or fail without
/// producing anything. Non-fatal findings land in `diagnostics`.
pub fn extract_filing(
    tree: &Value,
    accession_number: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Filing, Form4Error> {
    let issuers = extract_issuers(tree)?;
    let reporting_owners = extract_reporting_owners(tree)?;

    // The source schema reports line items at document level, not per owner;
    // attribute them to the primary (first listed) owner.
    let primary_cik = reporting_owners[0].cik.clone();
    let mut transactions = extract_non_derivative_transactions(tree, &primary_cik, diagnostics)?;
    transactions.extend(extract_derivative_transactions(tree, &primary_cik, diagnostics)?);

    let footnotes = extract_footnotes(tree, diagnostics)?;
    let signatures = extract_signatures(tree)?;

    Ok(Filing {
        accession_number: accession_number.to_string(),
        schema_version: leaf_at(tree, "schemaVersion").map(str::to_string),
        document_type: leaf_at(tree, "documentType").map(str::to_string),
        period_of_report: optional_date(tree, "periodOfReport", "")?,
        issuers,
        reporting_owners,
        transactions,
        footnotes,
        signatures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form4::normalize::normalize_document;
    use rust_decimal_macros::dec;

    fn tree(xml: &str) -> Value {
        normalize_document(xml).unwrap()
    }

    #[test]
    fn test_extract_issuer_requires_cik_and_name() {
        let t = tree(
            r#"<ownershipDocument>
                <issuer><issuerName>Ingredion Inc</issuerName></issuer>
            </ownershipDocument>"#,
        );
        let err = extract_issuers(&t).unwrap_err();
        match err {
            Form4Error::MissingRequiredField { path } => {
                assert_eq!(path, "issuer[0].issuerCik");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_issuer_none_symbol_treated_as_absent() {
        let t = tree(
            r#"<ownershipDocument>
                <issuer>
                    <issuerCik>0001234567</issuerCik>
                    <issuerName>Privately Listed Corp</issuerName>
                    <issuerTradingSymbol>NONE</issuerTradingSymbol>
                </issuer>
            </ownershipDocument>"#,
        );
        let issuers = extract_issuers(&t).unwrap();
        assert_eq!(issuers[0].trading_symbol, None);
    }

    #[test]
    fn test_owner_flags_default_false_and_title_requires_officer() {
        let t = tree(
            r#"<ownershipDocument>
                <reportingOwner>
                    <reportingOwnerId>
                        <rptOwnerCik>0002020263</rptOwnerCik>
                        <rptOwnerName>Leonard Michael J</rptOwnerName>
                    </reportingOwnerId>
                </reportingOwner>
            </ownershipDocument>"#,
        );
        let owners = extract_reporting_owners(&t).unwrap();
        assert_eq!(owners.len(), 1);
        let owner = &owners[0];
        assert!(!owner.is_director && !owner.is_officer);
        assert!(!owner.is_ten_percent_owner && !owner.is_other);
        assert_eq!(owner.officer_title, None);
        assert_eq!(owner.address, None);
    }

    #[test]
    fn test_missing_price_is_absent_not_zero() {
        let t = tree(
            r#"<ownershipDocument>
                <nonDerivativeTable>
                    <nonDerivativeTransaction>
                        <securityTitle><value>Common Stock</value></securityTitle>
                        <transactionDate><value>2025-09-15</value></transactionDate>
                        <transactionCoding><transactionCode>A</transactionCode></transactionCoding>
                        <transactionAmounts>
                            <transactionShares><value>100</value></transactionShares>
                            <transactionAcquiredDisposedCode><value>A</value></transactionAcquiredDisposedCode>
                        </transactionAmounts>
                    </nonDerivativeTransaction>
                </nonDerivativeTable>
            </ownershipDocument>"#,
        );
        let mut diags = Vec::new();
        let txns = extract_non_derivative_transactions(&t, "0002020263", &mut diags).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].price_per_share, None);
        assert_eq!(txns[0].shares, Some(dec!(100)));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_footnote_only_price_element_is_absent() {
        let t = tree(
            r#"<ownershipDocument>
                <nonDerivativeTable>
                    <nonDerivativeTransaction>
                        <securityTitle><value>Common Stock</value></securityTitle>
                        <transactionDate><value>2025-09-15</value></transactionDate>
                        <transactionCoding><transactionCode>G</transactionCode></transactionCoding>
                        <transactionAmounts>
                            <transactionPricePerShare><footnoteId id="F2"/></transactionPricePerShare>
                            <transactionAcquiredDisposedCode><value>D</value></transactionAcquiredDisposedCode>
                        </transactionAmounts>
                    </nonDerivativeTransaction>
                </nonDerivativeTable>
            </ownershipDocument>"#,
        );
        let mut diags = Vec::new();
        let txns = extract_non_derivative_transactions(&t, "0002020263", &mut diags).unwrap();
        assert_eq!(txns[0].price_per_share, None);
        assert_eq!(txns[0].shares, None);
        assert_eq!(txns[0].footnote_ids, vec!["F2".to_string()]);
    }

    #[test]
    fn test_transaction_missing_date_names_field_path() {
        let t = tree(
            r#"<ownershipDocument>
                <nonDerivativeTable>
                    <nonDerivativeTransaction>
                        <securityTitle><value>Common Stock</value></securityTitle>
                        <transactionCoding><transactionCode>S</transactionCode></transactionCoding>
                        <transactionAmounts>
                            <transactionAcquiredDisposedCode><value>D</value></transactionAcquiredDisposedCode>
                        </transactionAmounts>
                    </nonDerivativeTransaction>
                </nonDerivativeTable>
            </ownershipDocument>"#,
        );
        let mut diags = Vec::new();
        let err = extract_non_derivative_transactions(&t, "cik", &mut diags).unwrap_err();
        match err {
            Form4Error::MissingRequiredField { path } => assert_eq!(
                path,
                "nonDerivativeTable.nonDerivativeTransaction[0].transactionDate"
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_code_kept_with_diagnostic() {
        let t = tree(
            r#"<ownershipDocument>
                <nonDerivativeTable>
                    <nonDerivativeTransaction>
                        <securityTitle><value>Common Stock</value></securityTitle>
                        <transactionDate><value>2025-09-15</value></transactionDate>
                        <transactionCoding><transactionCode>Q9</transactionCode></transactionCoding>
                        <transactionAmounts>
                            <transactionAcquiredDisposedCode><value>A</value></transactionAcquiredDisposedCode>
                        </transactionAmounts>
                    </nonDerivativeTransaction>
                </nonDerivativeTable>
            </ownershipDocument>"#,
        );
        let mut diags = Vec::new();
        let txns = extract_non_derivative_transactions(&t, "cik", &mut diags).unwrap();
        assert_eq!(txns[0].code, TransactionCode::Other("Q9".to_string()));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::UnrecognizedTransactionCode);
    }

    #[test]
    fn test_duplicate_footnote_id_last_wins_with_diagnostic() {
        let t = tree(
            r#"<ownershipDocument>
                <footnotes>
                    <footnote id="F1">first text</footnote>
                    <footnote id="F1">second text</footnote>
                </footnotes>
            </ownershipDocument>"#,
        );
        let mut diags = Vec::new();
        let notes = extract_footnotes(&t, &mut diags).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "second text");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::DuplicateFootnoteId);
    }

    #[test]
    fn test_footnote_html_entities_decoded() {
        let t = tree(
            r#"<ownershipDocument>
                <footnotes>
                    <footnote id="F1">the company&amp;#8217;s plan</footnote>
                </footnotes>
            </ownershipDocument>"#,
        );
        let mut diags = Vec::new();
        let notes = extract_footnotes(&t, &mut diags).unwrap();
        assert_eq!(notes[0].text, "the company\u{2019}s plan");
    }

    #[test]
    fn test_signatures_required() {
        let t = tree("<ownershipDocument></ownershipDocument>");
        let err = extract_signatures(&t).unwrap_err();
        assert!(matches!(err, Form4Error::MissingRequiredField { .. }));
    }

    #[test]
    fn test_multiple_signatures_preserve_order() {
        let t = tree(
            r#"<ownershipDocument>
                <ownerSignature>
                    <signatureName>First Signer</signatureName>
                    <signatureDate>2025-09-16</signatureDate>
                </ownerSignature>
                <ownerSignature>
                    <signatureName>Second Signer</signatureName>
                    <signatureDate>2025-09-16</signatureDate>
                </ownerSignature>
            </ownershipDocument>"#,
        );
        let sigs = extract_signatures(&t).unwrap();
        assert_eq!(sigs.len(), 2);
        assert_eq!(sigs[0].name, "First Signer");
        assert_eq!(sigs[1].name, "Second Signer");
    }

    #[test]
    fn test_derivative_terms_extracted() {
        let t = tree(
            r#"<ownershipDocument>
                <derivativeTable>
                    <derivativeTransaction>
                        <securityTitle><value>Stock Option</value></securityTitle>
                        <transactionDate><value>2025-09-15</value></transactionDate>
                        <conversionOrExercisePrice><value>55.25</value></conversionOrExercisePrice>
                        <transactionCoding><transactionCode>M</transactionCode></transactionCoding>
                        <transactionAmounts>
                            <transactionShares><value>1500</value></transactionShares>
                            <transactionAcquiredDisposedCode><value>A</value></transactionAcquiredDisposedCode>
                        </transactionAmounts>
                        <exerciseDate><value>2025-09-15</value></exerciseDate>
                        <expirationDate><value>2030-01-31</value></expirationDate>
                        <underlyingSecurity>
                            <underlyingSecurityTitle><value>Common Stock</value></underlyingSecurityTitle>
                            <underlyingSecurityShares><value>1500</value></underlyingSecurityShares>
                        </underlyingSecurity>
                    </derivativeTransaction>
                </derivativeTable>
            </ownershipDocument>"#,
        );
        let mut diags = Vec::new();
        let txns = extract_derivative_transactions(&t, "cik", &mut diags).unwrap();
        assert_eq!(txns.len(), 1);
        let terms = txns[0].derivative_terms().unwrap();
        assert_eq!(terms.underlying_title.as_deref(), Some("Common Stock"));
        assert_eq!(terms.underlying_shares, Some(dec!(1500)));
        assert_eq!(terms.conversion_or_exercise_price, Some(dec!(55.25)));
        assert_eq!(
            terms.expiration_date,
            Some(NaiveDate::from_ymd_opt(2030, 1, 31).unwrap())
        );
    }

    #[test]
    fn test_joint_filing_attributes_line_items_to_primary_owner() {
        let t = tree(
            r#"<ownershipDocument>
                <issuer>
                    <issuerCik>0001046257</issuerCik>
                    <issuerName>Ingredion Inc</issuerName>
                </issuer>
                <reportingOwner>
                    <reportingOwnerId>
                        <rptOwnerCik>0002020263</rptOwnerCik>
                        <rptOwnerName>Leonard Michael J</rptOwnerName>
                    </reportingOwnerId>
                </reportingOwner>
                <reportingOwner>
                    <reportingOwnerId>
                        <rptOwnerCik>0001111111</rptOwnerCik>
                        <rptOwnerName>Leonard Family Trust</rptOwnerName>
                    </reportingOwnerId>
                </reportingOwner>
                <nonDerivativeTable>
                    <nonDerivativeTransaction>
                        <securityTitle><value>Common Stock</value></securityTitle>
                        <transactionDate><value>2025-09-15</value></transactionDate>
                        <transactionCoding><transactionCode>S</transactionCode></transactionCoding>
                        <transactionAmounts>
                            <transactionAcquiredDisposedCode><value>D</value></transactionAcquiredDisposedCode>
                        </transactionAmounts>
                        <ownershipNature>
                            <directOrIndirectOwnership><value>I</value></directOrIndirectOwnership>
                            <natureOfOwnership><value>By Trust</value></natureOfOwnership>
                        </ownershipNature>
                    </nonDerivativeTransaction>
                </nonDerivativeTable>
                <ownerSignature>
                    <signatureName>Leonard Michael J</signatureName>
                    <signatureDate>2025-09-16</signatureDate>
                </ownerSignature>
            </ownershipDocument>"#,
        );
        let mut diags = Vec::new();
        let filing = extract_filing(&t, "0001046257-25-000123", &mut diags).unwrap();
        assert_eq!(filing.reporting_owners.len(), 2);
        assert_eq!(filing.transactions.len(), 1);
        assert_eq!(filing.transactions[0].owner_cik, "0002020263");
        assert_eq!(filing.transactions[0].ownership, OwnershipNature::Indirect);
        assert_eq!(
            filing.transactions[0].indirect_ownership_nature.as_deref(),
            Some("By Trust")
        );
    }

    #[test]
    fn test_holdings_rows_are_skipped() {
        let t = tree(
            r#"<ownershipDocument>
                <nonDerivativeTable>
                    <nonDerivativeHolding>
                        <securityTitle><value>Common Stock</value></securityTitle>
                        <postTransactionAmounts>
                            <sharesOwnedFollowingTransaction><value>1000</value></sharesOwnedFollowingTransaction>
                        </postTransactionAmounts>
                    </nonDerivativeHolding>
                </nonDerivativeTable>
            </ownershipDocument>"#,
        );
        let mut diags = Vec::new();
        let txns = extract_non_derivative_transactions(&t, "cik", &mut diags).unwrap();
        assert!(txns.is_empty());
    }
}
