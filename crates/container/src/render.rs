//! Renders an expression tree back to script text.

use csl_lang::{Node, Op};

pub const RENDER_HEADER: &str = "# expanded by CSL";

/// Infix arithmetic and call syntax for `APPLY`. The chain of `LET`s at the
/// root (each one the body of the previous) becomes `name = value` lines ahead
/// of the final expression; any other `LET` stays inline so its scope is kept.
pub fn render_source(node: &Node) -> String {
    let mut assigns = Vec::new();
    let mut tail = node;
    while tail.op() == Op::Let {
        let (value, body) = tail.pair();
        assigns.push(format!("{} = {}", tail.name().unwrap_or_default(), render(value)));
        tail = body;
    }
    let result = render(tail);

    let mut out = String::from(RENDER_HEADER);
    out.push('\n');
    for line in assigns {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&result);
    out.push('\n');
    out
}

fn render(node: &Node) -> String {
    match node.op() {
        Op::Int => node.int_value().unwrap_or_default().to_string(),
        Op::Var => node.name().unwrap_or_default().to_string(),
        Op::Add | Op::Mul => {
            let (left, right) = node.pair();
            let symbol = if node.op() == Op::Add { '+' } else { '*' };
            format!("({} {} {})", render(left), symbol, render(right))
        }
        Op::Apply => {
            let (callee, argument) = node.pair();
            format!("{}({})", render(callee), render(argument))
        }
        Op::Let => {
            let (value, body) = node.pair();
            format!(
                "(let {} -> {} in {})",
                node.name().unwrap_or_default(),
                render(value),
                render(body)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use csl_lang::{Environment, Evaluator, Value, compile};

    fn reevaluate(rendered: &str, environment: Environment) -> Value {
        let node = parse_script(rendered).unwrap();
        Evaluator::with_environment(environment).eval(&node).unwrap()
    }

    #[test]
    fn test_nested_arithmetic_is_parenthesized() {
        let node = Node::mul(Node::add(Node::int(1), Node::var("x")), Node::int(3));
        assert_eq!(render_source(&node), "# expanded by CSL\n((1 + x) * 3)\n");
    }

    #[test]
    fn test_root_lets_are_hoisted() {
        let node = compile("let a -> 2 in let b -> a * 3 in b + 1").unwrap();
        let rendered = render_source(&node);
        assert_eq!(rendered, "# expanded by CSL\na = 2\nb = (a * 3)\n(b + 1)\n");
        assert_eq!(parse_script(&rendered).unwrap(), node);
    }

    #[test]
    fn test_nested_let_keeps_its_scope() {
        let node = compile("let x -> 5 in (let x -> 7 in x) + x").unwrap();
        let rendered = render_source(&node);
        assert_eq!(rendered, "# expanded by CSL\nx = 5\n((let x -> 7 in x) + x)\n");
        assert_eq!(reevaluate(&rendered, Environment::with_builtins()), Value::Int(12));
    }

    #[test]
    fn test_operand_let_does_not_leak_to_siblings() {
        let node = compile("(let b -> 2 in b) + b").unwrap();
        let mut environment = Environment::with_builtins();
        environment.define("b".to_string(), Value::Int(100));

        let rendered = render_source(&node);
        assert_eq!(rendered, "# expanded by CSL\n((let b -> 2 in b) + b)\n");
        assert_eq!(reevaluate(&rendered, environment), Value::Int(102));
    }

    #[test]
    fn test_let_inside_hoisted_value_stays_inline() {
        let node = compile("let y -> (let t -> 4 in t * t) in y + 1").unwrap();
        let rendered = render_source(&node);
        assert_eq!(rendered, "# expanded by CSL\ny = (let t -> 4 in (t * t))\n(y + 1)\n");
        assert_eq!(reevaluate(&rendered, Environment::with_builtins()), Value::Int(17));
    }

    #[test]
    fn test_curried_call() {
        let node = Node::apply(Node::apply(Node::var("sub"), Node::int(9)), Node::int(4));
        assert_eq!(render_source(&node), "# expanded by CSL\nsub(9)(4)\n");
    }
}
