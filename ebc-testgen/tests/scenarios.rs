//! End-to-end behaviour of the description → fragment pipeline.

mod common;

use common::{assemble_all, generate_to_string};
use ebc_testgen::*;

#[test]
fn header_only_block() {
    let doc = "1, 0x0C, True, False, (ADD, 5A) $ add r1, r2\n";
    let cases = assemble_all(doc);
    assert_eq!(cases.len(), 1);
    let (_, instr) = &cases[0];
    assert_eq!(instr.bytes(), vec![0x8C, 0x5A]);
    assert_eq!(instr.opcode.mnemonic(), "ADD");

    let (out, result) = generate_to_string(doc, FragmentStyle::Symbolic);
    assert_eq!(result.unwrap().fragments, 1);
    assert_eq!(
        out,
        "
assert_eq!(
    \"add r1, r2\",
    dis(
        opts,
        cur,
        &[
            &[byte(1, 0, OpCode::ADD), 0x5A][..],
        ].concat()
    )
);
"
    );
}

#[test]
fn natural_index_sentinel_operand() {
    let doc = "\
1, 0x32, False, True, 0b00100001) $ MOVnw R1, @R2 (+1, +0)
_, NATIND16, 16, signed=False
";
    let (_, instr) = &assemble_all(doc)[0];
    assert_eq!(instr.operands.len(), 1);
    assert_eq!(instr.operands[0].value(), 36879);
    assert_eq!(instr.operand_bytes(), vec![vec![0x0F, 0x90]]);
    assert_eq!(instr.bytes(), vec![0x72, 0b0010_0001, 0x0F, 0x90]);

    let (out, _) = generate_to_string(doc, FragmentStyle::Symbolic);
    assert!(
        out.contains("            &[byte(0, 1, OpCode::MOVnw), 0b00100001][..],\n"),
        "{out}"
    );
    assert!(out.contains("            &(36879u16).to_le_bytes()[..],\n"), "{out}");
}

#[test]
fn signed_literal_operand_byte_count_width() {
    let doc = "\
1, 0x37, True, True, 0b00110001) $ MOVIqq R1, -5
_, -5, 8, signed=True
";
    let (_, instr) = &assemble_all(doc)[0];
    assert_eq!(instr.operands[0].rust_type(), "i64");
    assert_eq!(instr.operand_bytes(), vec![(-5i64).to_le_bytes().to_vec()]);
    assert_eq!(instr.header_byte, 0xF7);

    let (out, _) = generate_to_string(doc, FragmentStyle::Symbolic);
    assert!(out.contains("&(-5i64).to_le_bytes()[..],"), "{out}");
}

#[test]
fn large_sentinels_encode_unsigned() {
    let doc = "\
1, 0x33, False, True, 0b00010010) $ MOVnd R2, R1 (+1, +1)
_, NATIND32, 32, signed=False

2, 0x24, True, False, 0b00010010) $ MOVqd R2, R1 (+1, +1)
_, NATIND64, 64, signed=False
";
    let cases = assemble_all(doc);
    assert_eq!(
        cases[0].1.operand_bytes()[0],
        2954019116u32.to_le_bytes().to_vec()
    );
    assert_eq!(
        cases[1].1.operand_bytes()[0],
        11529215048034579760u64.to_le_bytes().to_vec()
    );
}

#[test]
fn width_units_are_interchangeable() {
    let doc = "\
1, 0x2B, True, False, 0b00000001) $ PUSH32 R1
_, 7, 2, signed=False
_, 7, 16, signed=False
_, 7, 4, signed=False
_, 7, 32, signed=False
_, 7, 8, signed=False
_, 7, 64, signed=False
";
    let (_, instr) = &assemble_all(doc)[0];
    let lens: Vec<usize> = instr.operand_bytes().iter().map(Vec::len).collect();
    assert_eq!(lens, vec![2, 2, 4, 4, 8, 8]);
}

#[test]
fn operand_order_is_preserved() {
    let ab = "\
1, 0x1D, True, True, 0b00010010) $ MOVbw
_, 1, 2, signed=False
_, 2, 2, signed=False
";
    let ba = "\
1, 0x1D, True, True, 0b00010010) $ MOVbw
_, 2, 2, signed=False
_, 1, 2, signed=False
";
    let (_, a) = &assemble_all(ab)[0];
    let (_, b) = &assemble_all(ba)[0];
    assert_eq!(a.bytes(), vec![0xDD, 0x12, 0x01, 0x00, 0x02, 0x00]);
    assert_ne!(a.bytes(), b.bytes());
}

#[test]
fn generation_is_deterministic() {
    let doc = "\
1, 0x2D, True, False, 0b00000001) $ CMPI32weq R1, 2
_, 2, 2, signed=True

2, 0x04, False, False, 0b00000000) $ RET
";
    let (first, _) = generate_to_string(doc, FragmentStyle::Symbolic);
    let (second, _) = generate_to_string(doc, FragmentStyle::Symbolic);
    assert_eq!(first, second);
    assert_eq!(first.matches("assert_eq!(").count(), 2);
    // Parse order is emission order.
    let cmpi = first.find("CMPI32weq").unwrap();
    let ret = first.find("\"RET\"").unwrap();
    assert!(cmpi < ret);
}

#[test]
fn raw_style_spells_out_bytes() {
    let doc = "\
1, 0x32, False, True, 0b00100001) $ MOVnw R1, @R2 (+1, +0)
_, NATIND16, 16, signed=False
";
    let (out, result) = generate_to_string(doc, FragmentStyle::Raw);
    result.unwrap();
    assert!(out.contains("            &[0x72, 0x21][..],\n"), "{out}");
    assert!(out.contains("            &[0x0F, 0x90][..],\n"), "{out}");
    assert!(!out.contains("byte("));
}

#[test]
fn expected_text_is_escaped() {
    let doc = r#"1, 0x04, False, False, 00) $ say "hi" \o/"#;
    let (out, _) = generate_to_string(doc, FragmentStyle::Symbolic);
    assert!(out.contains(r#"    "say \"hi\" \\o/","#), "{out}");
}

#[test]
fn check_counts_without_output() {
    let doc = "\
1, 0x04, False, False, 00) $ RET

2, 0x2B, False, False, 01) $ PUSH32 R1
_, 3, 2, signed=False
";
    assert_eq!(
        check(doc).unwrap(),
        Summary {
            fragments: 2,
            operands: 1
        }
    );
}

#[test]
fn empty_document_emits_nothing() {
    let (out, result) = generate_to_string("\n\n", FragmentStyle::Symbolic);
    assert!(out.is_empty());
    assert_eq!(result.unwrap(), Summary::default());
}
