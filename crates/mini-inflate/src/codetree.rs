//! Canonical Huffman code tree construction and decoding
//!
//! The tree is built bottom-up from a vector of code lengths (one per
//! symbol, 0 meaning "this symbol has no code"), following the standard
//! canonical-Huffman construction: descend code length from the maximum
//! (15, DEFLATE's limit) down to 1, pairing up the previous (deeper)
//! layer's roots into internal nodes and prepending new leaves for symbols
//! assigned to the current depth.

use crate::bitstream::BitReader;
use crate::errors::InflateError;

const MAX_CODE_LENGTH: u32 = 15;

/// A node in a canonical Huffman tree.
///
/// Interior nodes always have both children; there is no notion of a
/// partially-built node once a [`CodeTree`] exists.
enum Node
{
    Leaf(u32),
    Internal(Box<Node>, Box<Node>)
}

/// An immutable canonical Huffman tree, built once per table and walked
/// once per decoded symbol.
pub struct CodeTree
{
    root: Node
}

impl CodeTree
{
    /// Build a tree from a vector of code lengths, one per symbol.
    ///
    /// Rejects the input (`CorruptStream`) if it has fewer than two
    /// symbols, if any code length exceeds [`MAX_CODE_LENGTH`], or if the
    /// lengths don't describe a complete canonical code (some depth pairs
    /// up to an odd count of subtrees, or more than one root survives).
    pub fn new(code_lengths: &[u32]) -> Result<CodeTree, InflateError>
    {
        if code_lengths.len() < 2
        {
            return Err(InflateError::CorruptStream("code length vector too short"));
        }

        for &length in code_lengths
        {
            if length > MAX_CODE_LENGTH
            {
                return Err(InflateError::CorruptStream("code length exceeds 15 bits"));
            }
        }

        let mut nodes: Vec<Node> = Vec::new();

        // Descend through code lengths, maximum 15 for DEFLATE, down through
        // a final depth-0 pass that only merges (no symbol has length 0
        // assigned here; length-0 means "no code").
        for depth in (0..=MAX_CODE_LENGTH).rev()
        {
            if nodes.len() % 2 != 0
            {
                return Err(InflateError::CorruptStream(
                    "code lengths do not represent a Huffman code tree"
                ));
            }

            let mut new_nodes = Vec::new();

            if depth > 0
            {
                for (symbol, &length) in code_lengths.iter().enumerate()
                {
                    if length == depth
                    {
                        new_nodes.push(Node::Leaf(symbol as u32));
                    }
                }
            }

            // Merge pairs of nodes from the previous, deeper layer.
            let mut previous = nodes.into_iter();
            while let (Some(left), Some(right)) = (previous.next(), previous.next())
            {
                new_nodes.push(Node::Internal(Box::new(left), Box::new(right)));
            }

            nodes = new_nodes;
        }

        if nodes.len() != 1
        {
            return Err(InflateError::CorruptStream(
                "code lengths do not represent a Huffman code tree"
            ));
        }

        Ok(CodeTree {
            root: nodes.into_iter().next().unwrap()
        })
    }

    /// Decode one symbol, walking the tree from the root one bit at a time:
    /// descend left on a 0 bit, right on a 1 bit.
    pub fn decode_symbol(&self, reader: &mut BitReader) -> Result<u32, InflateError>
    {
        let mut node = &self.root;

        loop
        {
            match node
            {
                Node::Leaf(symbol) => return Ok(*symbol),
                Node::Internal(left, right) =>
                {
                    node = if reader.read_bit()? == 0 { left } else { right };
                }
            }
        }
    }
}
