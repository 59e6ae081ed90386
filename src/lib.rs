//! # cypher-dsl: Composable Cypher Statements in Rust
//!
//! Build Cypher statements as immutable expression trees and render them to
//! canonical query text. Nothing here talks to a database: the output is a
//! `String` you hand to whatever driver you use.
//!
//! ## Design Principles
//!
//! 1. **Immutable model**: `Node`, `Expression`, `Condition`, `Statement` are plain values
//! 2. **Staged builder**: each stage only exposes the clauses that may follow it
//! 3. **Renderer owns the text**: one pass, deterministic, no state beyond what was emitted
//! 4. **Failures surface at `build()`**: construction errors travel with the builder
//!
//! ## Quick Start
//!
//! ```rust
//! use cypher_dsl::prelude::*;
//! use cypher_dsl::cypher;
//!
//! # fn example() -> cypher_dsl::Result<()> {
//! let m = cypher::node("Movie").named("m");
//! let statement = cypher::match_([&m])
//!     .where_(m.property("title")?.is_equal_to(cypher::literal_of("The Matrix")))
//!     .returning([&m])
//!     .build()?;
//!
//! assert_eq!(statement.cypher(), "MATCH (m:`Movie`) WHERE m.title = 'The Matrix' RETURN m");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | `model` | Expression, condition, pattern and clause types |
//! | `cypher` | Factories, the staged builder and the renderer |
//! | `functions` / `predicates` / `conditions` | Function calls, quantifiers, condition constants |
//! | `adapter` | Foreign predicate trees and label providers |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod cypher;
pub mod functions;
pub mod predicates;
pub mod conditions;
pub mod adapter;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Condition, Direction, Expression, IntoExpression, Literal, NamedPath, Node,
    PatternElement, Relationship, RelationshipChain, SortItem, Statement, SymbolicName,
};

// ============================================================================
// Re-exports: Rendering
// ============================================================================

pub use cypher::render::{render, DefaultRenderer, Renderer, RendererConfig};

/// Traits needed to chain builder stages.
pub mod prelude {
    pub use crate::cypher::builder::{
        ExposesCreate, ExposesMatch, ExposesMerge, ExposesReturning, ExposesUnwind,
        ExposesUpdatingClause, ExposesWith, Stage,
    };
    pub use crate::model::IntoExpression;
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("No name present.")]
    MissingName,

    #[error("{0} cannot be used with an implicit name as map entry.")]
    InvalidProjectionEntry(String),

    #[error("The list of expression to set must be even.")]
    OddSetArguments(usize),

    #[error("Cannot mix union and union all!")]
    MixedUnion,

    #[error("At least two statements are required!")]
    TooFewUnionParts,

    #[error("Can only union single queries!")]
    NestedUnion,

    #[error("{0} requires at least one item.")]
    EmptyClause(&'static str),

    #[error("No labels provided for entity {0}")]
    MissingLabels(String),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    #[error("Unsupported literal: {0}")]
    UnsupportedLiteral(String),

    #[error("{operator} expects {expected} argument(s), got {got}")]
    ArgumentCount { operator: String, expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
