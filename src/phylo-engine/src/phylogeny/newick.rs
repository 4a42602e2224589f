use callmatrix::SampleId;

use crate::error::PhylogenyError;
use crate::phylogeny::tree::{Tree, TreeNode};

/// Emit `tree` as a Newick string: internal nodes as `(item_1,...,item_n)`,
/// leaves as bare sample ids, terminated with `;`. A node whose total item
/// count (own samples plus child subtrees) is exactly one is emitted
/// without an extra, redundant parenthesis layer.
#[must_use]
pub fn emit(tree: &Tree) -> String {
    format!("{};", emit_node(tree, tree.root))
}

fn emit_node(tree: &Tree, id: usize) -> String {
    let node = &tree.nodes[id];
    let mut items: Vec<String> = node.samples.iter().map(|s| s.as_str().to_string()).collect();
    for &(_, child_id) in &node.children {
        items.push(emit_node(tree, child_id));
    }
    match items.len() {
        1 => items.into_iter().next().expect("length checked above"),
        _ => format!("({})", items.join(",")),
    }
}

/// Parse a Newick string back into a [`Tree`].
///
/// # Errors
/// Returns [`PhylogenyError::NewickParse`] on malformed input: unbalanced
/// parentheses, a missing separator between siblings, or trailing text
/// after the closing `;`.
pub fn parse(text: &str) -> Result<Tree, PhylogenyError> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed);
    let mut parser = Parser { bytes: trimmed.as_bytes(), pos: 0 };
    let mut nodes = Vec::new();
    let root = parser.parse_subtree(&mut nodes)?;
    parser.skip_ws();
    if parser.pos != parser.bytes.len() {
        return Err(PhylogenyError::NewickParse(format!("trailing characters at byte {}", parser.pos)));
    }
    Ok(Tree { nodes, root })
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn parse_subtree(&mut self, nodes: &mut Vec<TreeNode>) -> Result<usize, PhylogenyError> {
        self.skip_ws();
        if self.peek() == Some(b'(') {
            self.pos += 1;
            let mut samples = Vec::new();
            let mut children = Vec::new();
            loop {
                self.skip_ws();
                let is_internal = self.peek() == Some(b'(');
                let item_id = self.parse_subtree(nodes)?;
                if is_internal {
                    children.push((1.0, item_id));
                } else {
                    let leaf = nodes.pop().expect("bare-name branch always pushes exactly one node");
                    samples.extend(leaf.samples);
                }
                self.skip_ws();
                match self.peek() {
                    Some(b',') => {
                        self.pos += 1;
                    }
                    Some(b')') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(PhylogenyError::NewickParse("expected ',' or ')'".to_string())),
                }
            }
            self.parse_optional_label_and_length();
            let id = nodes.len();
            nodes.push(TreeNode { samples, children });
            Ok(id)
        } else {
            let name = self.parse_name()?;
            self.parse_optional_length();
            let id = nodes.len();
            nodes.push(TreeNode { samples: vec![SampleId::from(name)], children: Vec::new() });
            Ok(id)
        }
    }

    fn parse_name(&mut self) -> Result<String, PhylogenyError> {
        let start = self.pos;
        while !matches!(self.peek(), None | Some(b',' | b')' | b'(' | b':')) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(PhylogenyError::NewickParse("expected a sample name".to_string()));
        }
        Ok(std::str::from_utf8(&self.bytes[start..self.pos]).expect("ascii-subset newick text").trim().to_string())
    }

    fn parse_optional_length(&mut self) {
        if self.peek() == Some(b':') {
            self.pos += 1;
            while !matches!(self.peek(), None | Some(b',' | b')')) {
                self.pos += 1;
            }
        }
    }

    fn parse_optional_label_and_length(&mut self) {
        while !matches!(self.peek(), None | Some(b',' | b')')) {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tree: &Tree, id: usize) -> &str {
        tree.nodes[id].samples[0].as_str()
    }

    #[test]
    fn single_leaf_round_trips_without_parens() {
        let tree = Tree { nodes: vec![TreeNode { samples: vec![SampleId::from("S1")], children: Vec::new() }], root: 0 };
        assert_eq!(emit(&tree), "S1;");
        let parsed = parse("S1;").unwrap();
        assert_eq!(leaf(&parsed, parsed.root), "S1");
    }

    #[test]
    fn two_leaf_internal_node_emits_parens() {
        let nodes = vec![
            TreeNode { samples: vec![SampleId::from("S1")], children: Vec::new() },
            TreeNode { samples: vec![SampleId::from("S2")], children: Vec::new() },
            TreeNode { samples: Vec::new(), children: vec![(1.0, 0), (1.0, 1)] },
        ];
        let tree = Tree { nodes, root: 2 };
        assert_eq!(emit(&tree), "(S1,S2);");
    }

    #[test]
    fn parse_then_emit_is_stable_for_balanced_tree() {
        let original = "(S1,(S2,S3));";
        let parsed = parse(original).unwrap();
        assert_eq!(emit(&parsed), original);
    }

    #[test]
    fn parse_rejects_unbalanced_parens() {
        assert!(parse("(S1,S2;").is_err());
    }

    #[test]
    fn parse_ignores_branch_lengths_and_labels() {
        let parsed = parse("(S1:0.5,S2:1.2)root:0.0;").unwrap();
        assert_eq!(emit(&parsed), "(S1,S2);");
    }
}
