use super::*;

#[test]
fn keeps_source_order() {
	// keys deliberately out of alphabetical order
	let catalog = Catalog::from_json(r#"{
		"zz":  { "name": "HALT",    "mnemonic": "HALT", "opcode": 255 },
		"aa":  { "name": "MOVAIMM", "mnemonic": "MOV",  "opcode": 1, "arguments": ["A"] },
		"mm":  { "name": "NOP",     "mnemonic": "NOP",  "opcode": 0 }
	}"#).unwrap();

	let names: Vec<_> = catalog.iter().map(|d| d.name.as_str()).collect();
	assert_eq!(names, ["HALT", "MOVAIMM", "NOP"]);
}

#[test]
fn optional_fields() {
	let catalog = Catalog::from_json(r#"{
		"nop": { "name": "NOP", "mnemonic": "NOP", "opcode": 0 },
		"jz":  { "name": "JMPIMMZ", "mnemonic": "JMPIMM", "opcode": 7,
			"arguments": ["IMM"], "depend-on-flag": "Z", "addr-mode": "imm" },
		"ld":  { "name": "LOADZP", "mnemonic": "MOV", "opcode": 8,
			"arguments": ["A"], "addr-mode": "abs-zp" }
	}"#).unwrap();

	let descs: Vec<_> = catalog.iter().collect();
	assert_eq!(*descs[0], InstrDesc::new("NOP", "NOP", 0, &[]));
	assert_eq!(*descs[1], InstrDesc::new("JMPIMMZ", "JMPIMM", 7, &["IMM"]).with_flag("Z").with_mode(AddrMode::Imm));
	assert_eq!(descs[2].addr_mode, Some(AddrMode::AbsZp));
	assert_eq!(descs[2].depend_on_flag, "");
}

#[test]
fn empty_catalog() {
	let catalog = Catalog::from_json("{}").unwrap();
	assert!(catalog.is_empty());
	assert_eq!(catalog.len(), 0);
}

#[test]
fn duplicate_name() {
	let err = Catalog::from_descs(vec![
		InstrDesc::new("NOP", "NOP", 0, &[]),
		InstrDesc::new("NOP", "NOP", 1, &[]),
	]).unwrap_err();

	assert_eq!(err.kind, CatalogErrorKind::DuplicateName { name: "NOP".into() });
}

#[test]
fn duplicate_opcode() {
	let err = Catalog::from_json(r#"{
		"a": { "name": "NOP",  "mnemonic": "NOP",  "opcode": 0 },
		"b": { "name": "HALT", "mnemonic": "HALT", "opcode": 0 }
	}"#).unwrap_err();

	assert_eq!(err.kind, CatalogErrorKind::DuplicateOpcode {
		opcode: 0,
		first:  "NOP".into(),
		second: "HALT".into(),
	});
	assert_eq!(err.to_string(), "catalog error: opcode 0 is used by both 'NOP' and 'HALT'");
}

#[test]
fn malformed() {
	let bad = [
		// opcode doesn't fit in a byte
		r#"{ "a": { "name": "NOP", "mnemonic": "NOP", "opcode": 256 } }"#,
		// missing mnemonic
		r#"{ "a": { "name": "NOP", "opcode": 0 } }"#,
		// not an object
		r#"[ { "name": "NOP", "mnemonic": "NOP", "opcode": 0 } ]"#,
		// unknown addressing mode
		r#"{ "a": { "name": "NOP", "mnemonic": "NOP", "opcode": 0, "addr-mode": "sideways" } }"#,
		"{",
	];

	for src in &bad {
		match Catalog::from_json(src) {
			Err(CatalogError { kind: CatalogErrorKind::Malformed { .. }, .. }) => {}
			other => panic!("expected a malformed error for {}, got {:?}", src, other),
		}
	}
}

#[test]
fn missing_file() {
	let err = Catalog::load("tests/data/does-not-exist.json").unwrap_err();

	match err.kind {
		CatalogErrorKind::Io { path, .. } => assert_eq!(path, "tests/data/does-not-exist.json"),
		other => panic!("expected an io error, got {:?}", other),
	}
}
