use anyhow::{Context, anyhow};
use clap::Parser;
use tracing::{debug, info};

use syntax_node::ir::expressions::{
    AssignmentExpression, BinaryOperatorExpression, IdentifierExpression, PrimitiveExpression,
    UnaryOperatorExpression,
};
use syntax_node::ir::role;
use syntax_node::ir::statements::{BlockStatement, ExpressionStatement, ForStatement};
use syntax_node::ir::syntax_node::{
    AssignmentOperator, BinaryOperator, Literal, SyntaxTree, UnaryOperator,
};
use syntax_node::ir::transforms::outline::OutlinePrinter;
use syntax_node::logging::{LogOptions, init_logger};

/// Builds a counting `for` loop and prints its syntax tree outline.
#[derive(Parser, Debug)]
#[command(name = "syntax-outline", version, about)]
struct Args {
    /// Log filter for stderr (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in log output
    #[arg(long)]
    no_color: bool,

    /// Also write a DEBUG-level session log to the cache directory
    #[arg(long)]
    log_file: bool,

    /// Name of the loop variable
    #[arg(long, default_value = "x")]
    variable: String,

    /// Upper bound of the loop condition
    #[arg(long, default_value_t = 10)]
    limit: i64,

    /// Only print the loop's children attached under this role (e.g. "Initializer")
    #[arg(long)]
    role: Option<String>,
}

/// `for (v = 0; v < limit; v++) {}`
fn build_counting_loop(
    tree: &mut SyntaxTree,
    variable: &str,
    limit: i64,
) -> anyhow::Result<ForStatement> {
    let for_stmt = ForStatement::new(tree);

    let target = IdentifierExpression::new(tree, variable);
    let zero = PrimitiveExpression::new(tree, Literal::Int(0));
    let init = AssignmentExpression::new(tree, target.id(), AssignmentOperator::Assign, zero.id())?;
    let init = ExpressionStatement::new(tree, init.id())?;
    for_stmt.add_initializer(tree, init.id())?;

    let lhs = IdentifierExpression::new(tree, variable);
    let bound = PrimitiveExpression::new(tree, Literal::Int(limit));
    let condition =
        BinaryOperatorExpression::new(tree, lhs.id(), BinaryOperator::LessThan, bound.id())?;
    for_stmt.set_condition(tree, condition.id())?;

    let counter = IdentifierExpression::new(tree, variable);
    let step = UnaryOperatorExpression::new(tree, UnaryOperator::PostIncrement, counter.id())?;
    let step = ExpressionStatement::new(tree, step.id())?;
    for_stmt.add_iterator(tree, step.id())?;

    let body = BlockStatement::new(tree);
    for_stmt.set_embedded_statement(tree, body.id())?;
    Ok(for_stmt)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_logger(&LogOptions {
        no_color: args.no_color,
        log_level: args.log_level.clone(),
        file_logging: args.log_file,
        log_dir: None,
    })
    .context("failed to initialize logging")?;

    let mut tree = SyntaxTree::new();
    let for_stmt = build_counting_loop(&mut tree, &args.variable, args.limit)?;
    tree.verify()?;
    debug!("built loop with {} nodes", tree.len());

    match &args.role {
        Some(name) => {
            let role = role::lookup(name).ok_or_else(|| {
                let known: Vec<&str> = role::all().iter().map(|role| role.name()).collect();
                anyhow!("unknown role `{}` (known roles: {})", name, known.join(", "))
            })?;
            let children: Vec<_> = tree.children_of_role(for_stmt.id(), role).collect();
            info!("{} children under role {}", children.len(), role);
            for child in children {
                print!("{}", OutlinePrinter::print(&tree, child));
            }
        }
        None => print!("{}", OutlinePrinter::print(&tree, for_stmt.id())),
    }
    Ok(())
}
