use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: BlockId,
    pub has_children: bool,
}

impl BlockCommon {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: BlockId::new(id),
            has_children: false,
        }
    }
}
