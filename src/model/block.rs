//! Block and relationship types as emitted by the analysis service.

use serde::{Deserialize, Serialize};

/// Kind of a block in the analysis graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    /// A page of the analyzed document
    Page,
    /// A line of detected text
    Line,
    /// A single word
    Word,
    /// A table container
    Table,
    /// A cell of a table
    Cell,
    /// A cell spanning several grid positions
    MergedCell,
    /// Title of a table
    TableTitle,
    /// Footer of a table
    TableFooter,
    /// A key or value container of a form field
    KeyValueSet,
    /// A check box or radio button
    SelectionElement,
    /// A detected signature
    Signature,
    /// A query submitted with the analysis request
    Query,
    /// The answer to a query
    QueryResult,
    /// Any type this crate does not know about
    #[serde(other)]
    Unknown,
}

/// Entity type attached to a block (meaningful for KEY_VALUE_SET and CELL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// The key half of a form field
    Key,
    /// The value half of a form field
    Value,
    /// A table column header cell
    ColumnHeader,
    /// A table title cell
    TableTitle,
    /// A table footer cell
    TableFooter,
    /// A section title cell
    TableSectionTitle,
    /// A summary cell
    TableSummary,
    /// A structured table
    StructuredTable,
    /// A semi-structured table
    SemiStructuredTable,
    /// Any entity type this crate does not know about
    #[serde(other)]
    Other,
}

/// Kind of an edge between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// Structural containment
    Child,
    /// Key to value pairing
    Value,
    /// Complex features (e.g. query answers attached to a page)
    ComplexFeatures,
    /// Merged cell to constituent cells
    MergedCell,
    /// Block to its title
    Title,
    /// Query to its answer
    Answer,
    /// Table to its title block
    TableTitle,
    /// Table to its footer block
    TableFooter,
    /// Any relationship type this crate does not know about
    #[serde(other)]
    Other,
}

/// A typed, ordered edge from one block to others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship type
    #[serde(rename = "Type")]
    pub kind: RelationshipType,

    /// Referenced block ids, in source order
    #[serde(rename = "Ids", default)]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create a relationship of the given kind.
    pub fn new<S: Into<String>>(kind: RelationshipType, ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a CHILD relationship.
    pub fn child<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new(RelationshipType::Child, ids)
    }

    /// Create a VALUE relationship.
    pub fn value(id: impl Into<String>) -> Self {
        Self::new(RelationshipType::Value, [id.into()])
    }
}

/// A node in the analysis graph.
///
/// Only the attributes the reducer and the renderers look at are modeled;
/// everything else in the service response (geometry, query payloads, ...)
/// is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Unique block id
    pub id: String,

    /// Block type
    pub block_type: BlockType,

    /// Recognized text (LINE, WORD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Entity types (KEY_VALUE_SET, CELL)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<EntityType>,

    /// 1-based row index (CELL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// 1-based column index (CELL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    /// Number of rows spanned (CELL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,

    /// Number of columns spanned (CELL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,

    /// Recognition confidence, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Outgoing relationships, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl Block {
    /// Create a bare block.
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            text: None,
            entity_types: Vec::new(),
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
            confidence: None,
            page: None,
            relationships: Vec::new(),
        }
    }

    /// Create a LINE block.
    pub fn line(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Line).with_text(text)
    }

    /// Create a WORD block.
    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Word).with_text(text)
    }

    /// Create a CELL block at a 1-based grid position.
    pub fn cell(id: impl Into<String>, row: u32, column: u32) -> Self {
        Self::new(id, BlockType::Cell).at(row, column)
    }

    /// Create a KEY_VALUE_SET block carrying the KEY entity type.
    pub fn key(id: impl Into<String>) -> Self {
        Self::new(id, BlockType::KeyValueSet).with_entity(EntityType::Key)
    }

    /// Create a KEY_VALUE_SET block carrying the VALUE entity type.
    pub fn value(id: impl Into<String>) -> Self {
        Self::new(id, BlockType::KeyValueSet).with_entity(EntityType::Value)
    }

    /// Set text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an entity type and return self.
    pub fn with_entity(mut self, entity: EntityType) -> Self {
        self.entity_types.push(entity);
        self
    }

    /// Set the grid position and return self.
    pub fn at(mut self, row: u32, column: u32) -> Self {
        self.row_index = Some(row);
        self.column_index = Some(column);
        self
    }

    /// Set the page number and return self.
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Add a CHILD relationship and return self.
    pub fn with_children<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.relationships.push(Relationship::child(ids));
        self
    }

    /// Add a VALUE relationship and return self.
    pub fn with_value(mut self, id: impl Into<String>) -> Self {
        self.relationships.push(Relationship::value(id));
        self
    }

    /// Add an arbitrary relationship and return self.
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Check the block type.
    pub fn is(&self, block_type: BlockType) -> bool {
        self.block_type == block_type
    }

    /// Check whether this block carries an entity type.
    pub fn has_entity(&self, entity: EntityType) -> bool {
        self.entity_types.contains(&entity)
    }

    /// Check whether this is the key half of a form field.
    pub fn is_key(&self) -> bool {
        self.is(BlockType::KeyValueSet) && self.has_entity(EntityType::Key)
    }

    /// Ids referenced by all relationships of the given kind, in order.
    pub fn related_ids(&self, kind: RelationshipType) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(move |r| r.kind == kind)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    /// Ids referenced by CHILD relationships, in order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.related_ids(RelationshipType::Child)
    }

    /// Target of the first VALUE relationship, if any.
    pub fn value_id(&self) -> Option<&str> {
        self.relationships
            .iter()
            .find(|r| r.kind == RelationshipType::Value)
            .and_then(|r| r.ids.first())
            .map(String::as_str)
    }
}
