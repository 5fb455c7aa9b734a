use licensor_types::{AccountId, Error, License, LicenseId, LicenseScheme, Machine, MachineId};
use pretty_assertions::assert_eq;

fn license() -> License {
    License {
        id: LicenseId::new(),
        account_id: AccountId::new(),
        key: "C1B6DE-39A6E3-DE1529-8559A0-4AF593-V3".into(),
        name: None,
        scheme: Some(LicenseScheme::Ed25519Sign),
        expiry: None,
        product: None,
        policy: None,
        owner: None,
        users: vec![],
        entitlements: vec![],
    }
}

// ── Identifiers ──────────────────────────────────────────────────

#[test]
fn id_display_parse_roundtrip() {
    let id = MachineId::new();
    let parsed: MachineId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn id_parse_rejects_garbage() {
    assert!(matches!(LicenseId::parse("not-a-uuid"), Err(Error::InvalidUuid(_))));
    assert!(matches!("".parse::<MachineId>(), Err(Error::InvalidUuid(_))));
}

// ── Records ──────────────────────────────────────────────────────

#[test]
fn license_debug_redacts_key() {
    let dbg = format!("{:?}", license());
    assert!(dbg.contains("[REDACTED]"));
    assert!(!dbg.contains("C1B6DE"));
}

#[test]
fn machine_deserializes_with_defaults() {
    let json = r#"{
        "id": "01890a5d-ac96-774b-bcce-b302099a8057",
        "fingerprint": "4d:Eq:UV:D3:XZ:tL:WN:Bz:mA:Eg:E6:Mk:YX:dK:NC"
    }"#;
    let machine: Machine = serde_json::from_str(json).unwrap();
    assert_eq!(machine.fingerprint, "4d:Eq:UV:D3:XZ:tL:WN:Bz:mA:Eg:E6:Mk:YX:dK:NC");
    assert!(machine.license.is_none());
    assert!(machine.components.is_empty());
}

#[test]
fn machine_with_license_roundtrips() {
    let machine = Machine::new("fp").with_license(license());
    let json = serde_json::to_string(&machine).unwrap();
    let parsed: Machine = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, machine);
}

#[test]
fn unknown_scheme_deserializes() {
    let mut value = serde_json::to_value(license()).unwrap();
    value["scheme"] = "LEGACY_ENCRYPT".into();
    let parsed: License = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.scheme, Some(LicenseScheme::Other("LEGACY_ENCRYPT".into())));
}
