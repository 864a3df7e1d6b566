use csl_container::{
    AST_MAGIC, ContainerError, pack_node, pack_raw, pack_script_file, parse_script, render_source, unpack_node,
    unpack_node_file,
};
use csl_lang::{Environment, Evaluator, Node, Value, run};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn eval(node: &Node) -> Value {
    Evaluator::with_environment(Environment::with_builtins()).eval(node).unwrap()
}

#[test]
fn test_roundtrip_preserves_tree_and_value() {
    let sources = [
        "let x -> 5 in (let x -> 7 in x) + x",
        "add1(double(3)) * 2",
        "sub(10, 4) + pow(2, 5)",
        "floordiv(mod(17, 5), 2)",
    ];
    for source in sources {
        let (value, node) = run(source).unwrap();
        let packed = pack_node(&node, 9).unwrap();
        assert_eq!(&packed[..4], AST_MAGIC);

        let restored = unpack_node(&packed).unwrap();
        assert_eq!(restored.content_id(), node.content_id(), "{}", source);
        assert_eq!(eval(&restored), value, "{}", source);
    }
}

#[test]
fn test_raw_package_is_not_an_envelope() {
    let raw = pack_raw("file.txt", b"hello", 9).unwrap();
    assert!(matches!(
        unpack_node(&raw),
        Err(ContainerError::UnsupportedVersion { .. })
    ));
    assert!(matches!(
        unpack_node(b"XLSC\x00\x00\x00\x01"),
        Err(ContainerError::InvalidMagic { .. })
    ));
}

#[test]
fn test_envelope_with_bad_tree_is_rejected() {
    let mut packed = pack_node(&Node::int(1), 9).unwrap();
    packed.truncate(8);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(br#"{"op":"ADD","args":[],"meta":{}}"#).unwrap();
    packed.extend(encoder.finish().unwrap());

    assert!(matches!(unpack_node(&packed), Err(ContainerError::InvalidNode(_))));
}

#[test]
fn test_script_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("calc.script");
    fs::write(&script, "# totals\nbase = 5\nscaled = double(base)\nscaled + 1\n").unwrap();

    let (pkg, node) = pack_script_file(&script, None, 9).unwrap();
    assert_eq!(pkg, dir.path().join("calc.cslx"));
    assert_eq!(eval(&node), Value::Int(11));

    let out = dir.path().join("calc.expanded");
    let (written, restored) = unpack_node_file(&pkg, Some(&out)).unwrap();
    assert_eq!(written, out);
    assert_eq!(restored, node);

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text, "# expanded by CSL\nbase = 5\nscaled = double(base)\n(scaled + 1)\n");

    let reparsed = parse_script(&text).unwrap();
    assert_eq!(reparsed.content_id(), node.content_id());
}

#[test]
fn test_rendered_source_reevaluates() {
    let node = parse_script("a = 2\nb = a * 3\nmul = add1(b)\n").unwrap();
    let rendered = render_source(&node);
    assert_eq!(rendered, "# expanded by CSL\na = 2\nb = (a * 3)\nmul = add1(b)\nmul\n");
    assert_eq!(eval(&parse_script(&rendered).unwrap()), Value::Int(7));
}

#[test]
fn test_unpacked_source_reevaluates_to_original_value() {
    let cases = [
        "let x -> 5 in (let x -> 7 in x) + x",
        "double(let n -> 3 in n + n) + (let m -> 1 in m)",
        "let a -> 2 in (let a -> a * 10 in a) * a",
    ];
    for source in cases {
        let (value, node) = run(source).unwrap();
        let restored = unpack_node(&pack_node(&node, 9).unwrap()).unwrap();
        let reparsed = parse_script(&render_source(&restored)).unwrap();
        assert_eq!(eval(&reparsed), value, "{}", source);
    }
}

#[test]
fn test_bad_magic_envelope_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let pkg = dir.path().join("broken.cslx");
    fs::write(&pkg, b"nope").unwrap();

    let err = unpack_node_file(&pkg, None).unwrap_err();
    assert!(err.is_format_error());
    assert!(!dir.path().join("broken.script").exists());
}
