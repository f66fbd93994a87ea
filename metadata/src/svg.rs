//! Certificate card image.

use std::fmt::Write;

use base64::{engine::general_purpose, Engine as _};
use tenure_rarity::RarityClass;
use tenure_record::StakeInfo;
use tenure_types::{CertificateId, TOKEN_UNIT};
use tenure_utils::{format::format_units, CivilDateTime};

fn palette(class: RarityClass) -> (&'static str, &'static str) {
    match class {
        RarityClass::Common => ("#1f2937", "#9ca3af"),
        RarityClass::Rare => ("#1e3a8a", "#60a5fa"),
        RarityClass::Epic => ("#4c1d95", "#c084fc"),
        RarityClass::Legendary => ("#78350f", "#fbbf24"),
        RarityClass::Mythic => ("#7f1d1d", "#f87171"),
    }
}

/// Render the card as an SVG document.
pub fn render_svg(
    id: CertificateId,
    info: &StakeInfo,
    class: RarityClass,
    maturity: &CivilDateTime,
) -> String {
    let (background, accent) = palette(class);
    let mut svg = String::with_capacity(1024);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="350" height="500" viewBox="0 0 350 500">"#
    );
    let _ = write!(
        svg,
        r#"<rect width="350" height="500" rx="16" fill="{background}"/><rect x="12" y="12" width="326" height="476" rx="12" fill="none" stroke="{accent}" stroke-width="2"/>"#
    );
    let lines = [
        (60, 22, format!("TENURE #{}", id.as_u64())),
        (120, 14, format!("Amount: {}", format_units(info.amount, TOKEN_UNIT, 2))),
        (150, 14, format!("Term: {} days", info.term)),
        (180, 14, format!("APY: {}%", info.apy)),
        (210, 14, format!("Maturity: {maturity}")),
        (260, 16, format!("{} ({})", class, info.rarity_score)),
    ];
    for (y, size, text) in lines {
        let _ = write!(
            svg,
            r#"<text x="30" y="{y}" font-family="monospace" font-size="{size}" fill="{accent}">{text}</text>"#
        );
    }
    svg.push_str("</svg>");
    svg
}

/// The card as a `data:image/svg+xml;base64,` URI.
pub fn image_uri(
    id: CertificateId,
    info: &StakeInfo,
    class: RarityClass,
    maturity: &CivilDateTime,
) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        general_purpose::STANDARD.encode(render_svg(id, info, class, maturity))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_is_well_delimited() {
        let info = StakeInfo {
            term: 100,
            maturity_ts: 0,
            amount: 1_999_000 * TOKEN_UNIT,
            apy: 20,
            rarity_score: 0,
            rarity_bits: 0,
        };
        let svg = render_svg(
            CertificateId::new(4),
            &info,
            RarityClass::Common,
            &CivilDateTime::from_unix(0),
        );
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Amount: 1,999,000.00"));
        assert!(svg.contains("TENURE #4"));
    }

    #[test]
    fn image_uri_carries_the_whole_card() {
        let uri = image_uri(
            CertificateId::new(1),
            &StakeInfo::default(),
            RarityClass::Mythic,
            &CivilDateTime::from_unix(0),
        );
        let body = uri.strip_prefix("data:image/svg+xml;base64,").unwrap();
        assert!(!body.contains('#'));
        let svg = String::from_utf8(general_purpose::STANDARD.decode(body).unwrap()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("#7f1d1d"));
        assert!(svg.ends_with("</svg>"));
    }
}
