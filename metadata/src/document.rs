use serde::{Deserialize, Serialize};
use thiserror::Error;

use tenure_rarity::{decode_rarity_bits, RarityClass};
use tenure_record::{StakeInfo, StakeWord};
use tenure_types::{CertificateId, TOKEN_UNIT};
use tenure_utils::CivilDateTime;

use base64::{engine::general_purpose, Engine as _};

use crate::svg;

const DESCRIPTION: &str =
    "Tenure stake certificate: principal locked for a fixed term, redeemable with yield at maturity.";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// An attribute value. Numbers and strings serialize untagged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(u64),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

impl Attribute {
    fn text(trait_type: &str, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Text(value.into()),
            display_type: None,
        }
    }

    fn number(trait_type: &str, value: u64) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Number(value),
            display_type: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateMetadata {
    pub name: String,
    pub description: String,
    /// SVG data URI.
    pub image: String,
    pub attributes: Vec<Attribute>,
}

impl CertificateMetadata {
    pub fn attribute(&self, trait_type: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| &a.value)
    }

    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build the metadata document for certificate `id` holding `word`.
pub fn render(id: CertificateId, word: &StakeWord) -> CertificateMetadata {
    let info = StakeInfo::decode(word);
    let class = RarityClass::of(decode_rarity_bits(info.rarity_bits));
    let maturity = CivilDateTime::from_unix(info.maturity_ts);

    let attributes = vec![
        Attribute::text("Amount", (info.amount / TOKEN_UNIT).to_string()),
        Attribute::text("Term", info.term.to_string()),
        Attribute::text("APY", format!("{}%", info.apy)),
        Attribute {
            trait_type: "Maturity DateTime".to_string(),
            value: AttributeValue::Number(info.maturity_ts),
            display_type: Some("date".to_string()),
        },
        Attribute::text("Maturity Year", maturity.year.to_string()),
        Attribute::text("Maturity Month", maturity.month_name()),
        Attribute::text("Rarity", class.as_str()),
        Attribute::number("Rarity Score", u64::from(info.rarity_score)),
        Attribute::text("Class", term_class(info.term)),
    ];

    CertificateMetadata {
        name: format!("Tenure Stake #{}", id.as_u64()),
        description: DESCRIPTION.to_string(),
        image: svg::image_uri(id, &info, class, &maturity),
        attributes,
    }
}

/// `data:application/json;base64,` URI for certificate `id`.
pub fn token_uri(id: CertificateId, word: &StakeWord) -> Result<String, MetadataError> {
    let json = render(id, word).to_json()?;
    Ok(format!(
        "data:application/json;base64,{}",
        general_purpose::STANDARD.encode(json)
    ))
}

/// Coarse term bucket shown as the "Class" attribute.
fn term_class(term: u16) -> &'static str {
    match term {
        0..=30 => "Short",
        31..=180 => "Medium",
        181..=365 => "Long",
        _ => "Extended",
    }
}
