use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use log::{error, info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use treemaker::avl::{AvlNode, AvlTree};
use treemaker::bst::BinarySearchTree;
use treemaker::input::{self, InputResult};
use treemaker::layout::{layout, LayoutConfig};
use treemaker::node::TreeNode;
use treemaker::rbt::{Color, NodeRef, RedBlackTree};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    /// Red-black tree
    Rbt,
    /// AVL tree
    Avl,
    /// Unbalanced binary search tree
    Bst,
}

/// Build a red-black, AVL or plain binary search tree from a list of keys and print it.
#[derive(Parser, Debug)]
struct Cli {
    /// Which tree to build.
    #[arg(long, short, value_enum, default_value_t = Kind::Rbt)]
    kind: Kind,
    /// Comma-separated keys, inserted in order.
    #[arg(long, short = 'k')]
    keys: String,
    /// A key to delete after building the tree. May be repeated.
    #[arg(long, short = 'd')]
    delete: Vec<String>,
    /// Print canvas coordinates instead of the tree.
    #[arg(long)]
    layout: bool,
    /// Log more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

enum Tree {
    RedBlack(RedBlackTree<i64>),
    Avl(AvlTree<i64>),
    Bst(BinarySearchTree<i64>),
}

impl Tree {
    fn new(kind: Kind) -> Self {
        match kind {
            Kind::Rbt => Self::RedBlack(RedBlackTree::new()),
            Kind::Avl => Self::Avl(AvlTree::new()),
            Kind::Bst => Self::Bst(BinarySearchTree::new()),
        }
    }

    fn insert(&mut self, key: i64) -> bool {
        match self {
            Self::RedBlack(t) => t.insert(key),
            Self::Avl(t) => t.insert(key),
            Self::Bst(t) => t.insert(key),
        }
    }

    fn delete(&mut self, key: &i64) -> bool {
        match self {
            Self::RedBlack(t) => t.delete(key),
            Self::Avl(t) => t.delete(key),
            Self::Bst(t) => t.delete(key),
        }
    }

    fn render(&self, coordinates: bool) -> Vec<String> {
        match self {
            Self::RedBlack(t) => draw(t.root(), coordinates, describe_red_black),
            Self::Avl(t) => draw(t.root(), coordinates, describe_avl),
            Self::Bst(t) => draw(t.root(), coordinates, |n| n.key().to_string()),
        }
    }
}

fn describe_red_black(node: NodeRef<'_, i64>) -> String {
    let color = match node.color() {
        Color::Red => "red",
        Color::Black => "black",
    };
    format!("{} ({color})", node.key())
}

fn describe_avl(node: &AvlNode<i64>) -> String {
    format!("{} (h={} b={})", node.key(), node.height(), node.balance())
}

fn draw<'a, N, F>(root: Option<N>, coordinates: bool, describe: F) -> Vec<String>
where
    N: TreeNode<'a>,
    F: Fn(N) -> String,
{
    if root.is_none() {
        return vec!["(empty)".to_string()];
    }
    if coordinates {
        let placed = layout(root, &LayoutConfig::default());
        let mut lines = vec![format!("canvas {}x{}", placed.width, placed.height)];
        lines.extend(
            placed
                .placements
                .iter()
                .map(|p| format!("{} at ({}, {})", describe(p.node), p.x, p.y)),
        );
        return lines;
    }
    sideways(root, describe)
}

/// Prints the tree turned on its side: the root on the left, right subtrees above their parent
/// and left subtrees below.
fn sideways<'a, N, F>(root: Option<N>, describe: F) -> Vec<String>
where
    N: TreeNode<'a>,
    F: Fn(N) -> String,
{
    let mut lines = Vec::new();
    let mut stack = Vec::new();
    let mut current = root.map(|n| (n, 0));
    loop {
        while let Some((node, depth)) = current {
            stack.push((node, depth));
            current = node.right().map(|n| (n, depth + 1));
        }
        let Some((node, depth)) = stack.pop() else {
            break;
        };
        lines.push(format!("{}{}", "    ".repeat(depth), describe(node)));
        current = node.left().map(|n| (n, depth + 1));
    }
    lines
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn report<T>(result: InputResult<T>) -> Option<T> {
    result.map_err(|e| error!("{e}")).ok()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = TermLogger::init(
        level(cli.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("couldn't set up logging: {e}");
    }

    let Some(keys) = report(input::parse_keys::<i64>(&cli.keys)) else {
        return ExitCode::FAILURE;
    };
    let Some(deletes) = cli
        .delete
        .iter()
        .map(|key| report(input::parse_key::<i64>(key)))
        .collect::<Option<Vec<_>>>()
    else {
        return ExitCode::FAILURE;
    };

    let mut tree = Tree::new(cli.kind);
    for key in keys {
        if tree.insert(key) {
            info!("inserted {key}");
        } else {
            warn!("{key} is already in the tree");
        }
    }
    for key in deletes {
        if tree.delete(&key) {
            info!("deleted {key}");
        } else {
            warn!("{key} is not in the tree");
        }
    }

    for line in tree.render(cli.layout) {
        println!("{line}");
    }
    ExitCode::SUCCESS
}
