use crate::models::book::BookRecord;
use crate::models::state::DisplayFlags;
use crate::models::view::View;
use tracing::warn;

/// Element of the display tree: a single record or a named group.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultNode {
    Leaf(BookRecord),
    Group(BookGroup),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookGroup {
    pub name: String,
    pub children: Vec<ResultNode>,
}

impl BookGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn add(&mut self, child: ResultNode) {
        self.children.push(child);
    }
}

impl From<BookRecord> for ResultNode {
    fn from(record: BookRecord) -> Self {
        ResultNode::Leaf(record)
    }
}

impl From<BookGroup> for ResultNode {
    fn from(group: BookGroup) -> Self {
        ResultNode::Group(group)
    }
}

impl ResultNode {
    /// Heading text for groups, title for leaves.
    pub fn name(&self) -> &str {
        match self {
            ResultNode::Leaf(record) => &record.title,
            ResultNode::Group(group) => &group.name,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            ResultNode::Leaf(_) => 1,
            ResultNode::Group(group) => group.children.iter().map(ResultNode::leaf_count).sum(),
        }
    }

    /// Emit this node to `view`, depth first, children in insertion order.
    ///
    /// Returns the number of records the view refused. A refused record
    /// does not stop its siblings from rendering.
    pub fn render(&self, view: &mut dyn View, flags: DisplayFlags) -> usize {
        match self {
            ResultNode::Leaf(record) => match view.add_record(record, flags) {
                Ok(()) => 0,
                Err(e) => {
                    warn!("Failed to render '{}': {}", record.title, e);
                    1
                }
            },
            ResultNode::Group(group) => {
                view.add_heading(&group.name);
                let mut failed = 0;
                for child in &group.children {
                    failed += child.render(view, flags);
                }
                failed
            }
        }
    }
}
