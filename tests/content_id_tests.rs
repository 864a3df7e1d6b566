use csl_lang::{Node, compile};
use proptest::prelude::*;

fn arb_node() -> impl Strategy<Value = Node> {
  let leaf = prop_oneof![
    any::<i64>().prop_map(Node::int),
    "[a-z_][a-z0-9_]{0,6}".prop_map(Node::var),
  ];

  leaf.prop_recursive(4, 32, 2, |inner| {
    prop_oneof![
      (inner.clone(), inner.clone()).prop_map(|(l, r)| Node::add(l, r)),
      (inner.clone(), inner.clone()).prop_map(|(l, r)| Node::mul(l, r)),
      (inner.clone(), inner.clone()).prop_map(|(f, a)| Node::apply(f, a)),
      ("[a-z]{1,4}", inner.clone(), inner).prop_map(|(n, v, b)| Node::let_in(n, v, b)),
    ]
  })
}

proptest! {
  #[test]
  fn json_rebuild_preserves_content_id(node in arb_node()) {
    let rebuilt = Node::from_json(&node.to_json()).unwrap();
    prop_assert_eq!(rebuilt.content_id(), node.content_id());
    prop_assert_eq!(rebuilt, node);
  }

  #[test]
  fn canonical_form_has_no_whitespace(node in arb_node()) {
    prop_assert!(!node.to_canonical().contains(' '));
  }
}

#[test]
fn parsing_twice_yields_identical_ids() {
  let source = "let f -> sub(100) in f(double(3)) * 2";
  assert_eq!(
    compile(source).unwrap().content_id(),
    compile(source).unwrap().content_id()
  );
}
