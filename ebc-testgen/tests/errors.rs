//! Fail-fast behaviour and error reporting.

mod common;

use common::generate_to_string;
use ebc_testgen::*;

const GOOD_BLOCK: &str = "1, 0x04, False, False, 0b00000000) $ RET";

#[test]
fn missing_dollar_keeps_earlier_fragments() {
    let doc = format!("{GOOD_BLOCK}\n\n2, 0x0C, True, False, (ADD, 5A) add r1, r2\n");
    let (out, result) = generate_to_string(&doc, FragmentStyle::Symbolic);

    assert_eq!(out.matches("assert_eq!(").count(), 1, "{out}");
    assert!(out.contains("\"RET\""));
    match result.unwrap_err() {
        GenerateError::Block(err) => {
            assert_eq!(err.first_line, 3);
            assert!(matches!(err.source, Error::MalformedBlock { line: 3, .. }));
            assert_eq!(err.text, "2, 0x0C, True, False, (ADD, 5A) add r1, r2");
        }
        other => panic!("expected a block error, got {other}"),
    }
}

#[test]
fn unsupported_width_emits_nothing_for_block() {
    let doc = "\
1, 0x2B, False, False, 0b00000001) $ PUSH32 R1
_, 5, 7, signed=False
";
    let (out, result) = generate_to_string(doc, FragmentStyle::Symbolic);
    assert!(out.is_empty(), "{out}");
    match result.unwrap_err() {
        GenerateError::Block(err) => {
            assert_eq!(err.source, Error::UnsupportedWidth { line: 2, width: 7 });
            assert_eq!(err.text, "1, 0x2B, False, False, 0b00000001) $ PUSH32 R1\n_, 5, 7, signed=False");
        }
        other => panic!("expected a block error, got {other}"),
    }
}

#[test]
fn unknown_opcode() {
    let doc = "1, 0x27, False, False, 00) $ ???\n";
    let err = check(doc).unwrap_err();
    assert_eq!(err.source, Error::UnknownOpcode { line: 1, opcode: 0x27 });
    assert_eq!(err.source.to_string(), "line 1: unknown opcode 0x27");
}

#[test]
fn opcode_above_six_bits_is_unknown() {
    let err = check("1, 0x4C, False, False, 00) $ x\n").unwrap_err();
    assert!(matches!(err.source, Error::UnknownOpcode { opcode: 0x4C, .. }));
}

#[test]
fn operand_out_of_range_is_rejected() {
    let cases = [
        ("_, 65536, 2, signed=False", "u16"),
        ("_, -1, 16, signed=False", "u16"),
        ("_, 2147483648, 4, signed=True", "i32"),
        ("_, NATIND64, 8, signed=True", "i64"),
        ("_, NATIND32, 16, signed=False", "u16"),
    ];
    for (operand, ty) in cases {
        let doc = format!("1, 0x2B, False, False, 01) $ x\n{operand}\n");
        let err = check(&doc).unwrap_err();
        match err.source {
            Error::OperandOutOfRange { line: 2, ty: t, .. } => assert_eq!(t, ty, "{operand}"),
            other => panic!("{operand}: expected OperandOutOfRange, got {other}"),
        }
    }
}

#[test]
fn stops_at_first_error() {
    let doc = format!(
        "{GOOD_BLOCK}\n\n2, 0x0C, maybe, False, 5A) $ x\n\n3, 0x99, False, False, 5A) $ y\n"
    );
    let (out, result) = generate_to_string(&doc, FragmentStyle::Symbolic);
    assert_eq!(out.matches("assert_eq!(").count(), 1);
    let GenerateError::Block(err) = result.unwrap_err() else {
        panic!("expected a block error");
    };
    assert!(matches!(
        err.source,
        Error::MalformedBlock {
            field: Field::FlagHigh,
            line: 3,
            ..
        }
    ));
}

#[test]
fn block_error_display_includes_block() {
    let err = check("1, 0x04, False, False, 00) $ RET\n_, 1, 3, signed=False\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("unsupported operand width 3"), "{msg}");
    assert!(msg.contains("--- offending block ---"), "{msg}");
    assert!(msg.contains("_, 1, 3, signed=False"), "{msg}");
}

#[test]
fn malformed_error_display_names_field() {
    let err = check("1, 0x04, False, False, 00) $ RET\n_, 1, 2, signed=maybe\n").unwrap_err();
    let msg = err.source.to_string();
    assert!(msg.starts_with("line 2, column 10: malformed signedness:"), "{msg}");
}

#[test]
fn io_errors_are_reported() {
    struct Broken;
    impl std::io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let err = generate(GOOD_BLOCK, Broken, &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, GenerateError::Io(_)), "{err}");
}
