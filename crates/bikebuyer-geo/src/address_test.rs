use super::*;

fn ch() -> CountryCode {
    CountryCode::domestic()
}

fn attrs(label: Option<&str>, detail: Option<&str>) -> SearchAttrs {
    SearchAttrs {
        label: label.map(str::to_owned),
        detail: detail.map(str::to_owned),
        origin: Some("address".to_owned()),
    }
}

#[test]
fn parses_comma_separated_label() {
    let m = parse_address(&SearchAttrs::from_label("Rue du Lac 12, 1950 Sion (VS)"), &ch()).unwrap();
    assert_eq!(
        m,
        AddressMatch {
            street: "Rue du Lac 12".to_owned(),
            zip: Some("1950".to_owned()),
            city: Some("Sion".to_owned()),
            canton: Some("VS".to_owned()),
        }
    );
}

#[test]
fn street_stops_before_zip_without_comma() {
    let m = parse_address(
        &SearchAttrs::from_label("Avenue de la Gare 5 <b>1950 Sion</b>"),
        &ch(),
    )
    .unwrap();
    assert_eq!(m.street, "Avenue de la Gare 5");
    assert_eq!(m.zip.as_deref(), Some("1950"));
    assert_eq!(m.city.as_deref(), Some("Sion"));
    assert!(m.canton.is_none());
}

#[test]
fn street_uses_house_number_prefix() {
    let m = parse_address(&SearchAttrs::from_label("Chemin des Vignes 12a Sion"), &ch()).unwrap();
    assert_eq!(m.street, "Chemin des Vignes 12a");
    assert!(m.zip.is_none());
}

#[test]
fn street_falls_back_to_whole_text() {
    let m = parse_address(&SearchAttrs::from_label("Rue Centrale"), &ch()).unwrap();
    assert_eq!(m.street, "Rue Centrale");
    assert!(m.zip.is_none());
    assert_eq!(m.city.as_deref(), Some("Rue Centrale"));
}

#[test]
fn locality_comes_from_detail_with_country_marker_canton() {
    let m = parse_address(
        &attrs(
            Some("Rue du Lac 12 <b>1950 Sion</b>"),
            Some("rue du lac 12 1950 sion 6266 sion ch vs"),
        ),
        &ch(),
    )
    .unwrap();
    assert_eq!(m.street, "Rue du Lac 12");
    assert_eq!(m.zip.as_deref(), Some("1950"));
    assert_eq!(m.canton.as_deref(), Some("VS"));
}

#[test]
fn country_marker_follows_configured_domestic_code() {
    let detail = Some("hauptstrasse 1 9490 vaduz li ob");
    let li = CountryCode::new("LI");
    let m = parse_address(&attrs(Some("Hauptstrasse 1"), detail), &li).unwrap();
    assert_eq!(m.canton.as_deref(), Some("OB"));

    let m = parse_address(&attrs(Some("Hauptstrasse 1"), detail), &ch()).unwrap();
    assert!(m.canton.is_none());
}

#[test]
fn detail_used_as_street_when_label_missing() {
    let m = parse_address(&attrs(None, Some("Rue de l'Eglise 3, 1890 St-Maurice")), &ch()).unwrap();
    assert_eq!(m.street, "Rue de l'Eglise 3");
    assert_eq!(m.zip.as_deref(), Some("1890"));
    assert_eq!(m.city.as_deref(), Some("St-Maurice"));
}

#[test]
fn empty_street_is_dropped() {
    assert!(parse_address(&SearchAttrs::from_label(", 1950 Sion"), &ch()).is_none());
    assert!(parse_address(&SearchAttrs::from_label("1950 Sion"), &ch()).is_none());
    assert!(parse_address(&attrs(None, None), &ch()).is_none());
}

#[test]
fn parse_addresses_skips_unusable_entries() {
    let results = vec![
        SearchAttrs::from_label("Rue du Lac 12, 1950 Sion (VS)"),
        SearchAttrs::from_label("<b></b>"),
        SearchAttrs::from_label("Rue du Lac 14, 1950 Sion (VS)"),
    ];
    let domestic = ch();
    let streets: Vec<_> = parse_addresses(&results, &domestic)
        .map(|m| m.street)
        .collect();
    assert_eq!(streets, ["Rue du Lac 12", "Rue du Lac 14"]);
}

#[test]
fn reparsing_serialized_match_is_stable() {
    let first = parse_address(&SearchAttrs::from_label("Rue du Lac 12, 1950 Sion (VS)"), &ch()).unwrap();
    let serialized = format!(
        "{}, {} {} ({})",
        first.street,
        first.zip.as_deref().unwrap(),
        first.city.as_deref().unwrap(),
        first.canton.as_deref().unwrap()
    );
    let second = parse_address(&SearchAttrs::from_label(&serialized), &ch()).unwrap();
    assert_eq!(first, second);
}
