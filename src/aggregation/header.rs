use serde_json::{Map, Value};

use crate::stream::{DecodeError, StreamInput, StreamOutput, Writeable};

/// Opaque reference to a sibling pipeline stage. Carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineAggregatorRef {
    pub type_name: String,
    pub name: String,
    pub bucket_paths: Vec<String>,
}

impl PipelineAggregatorRef {
    pub fn new(
        type_name: impl Into<String>,
        name: impl Into<String>,
        bucket_paths: Vec<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            bucket_paths,
        }
    }

    pub fn read_from(input: &mut StreamInput) -> Result<Self, DecodeError> {
        let type_name = input.read_string()?;
        let name = input.read_string()?;
        let bucket_paths = input.read_string_list()?;
        Ok(Self {
            type_name,
            name,
            bucket_paths,
        })
    }
}

impl Writeable for PipelineAggregatorRef {
    fn write_to(&self, out: &mut StreamOutput) {
        out.write_string(&self.type_name);
        out.write_string(&self.name);
        out.write_string_list(&self.bucket_paths);
    }
}

/// Fields every aggregation result carries, written before the
/// result-specific body.
///
/// # Panics
///
/// [`AggregationHeader::new`] panics on an empty name.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationHeader {
    name: String,
    pipeline_aggregators: Vec<PipelineAggregatorRef>,
    metadata: Option<Map<String, Value>>,
}

impl AggregationHeader {
    pub fn new(
        name: impl Into<String>,
        pipeline_aggregators: Vec<PipelineAggregatorRef>,
        metadata: Option<Map<String, Value>>,
    ) -> Self {
        let name = name.into();
        // Decoding rejects empty names, so nothing empty may be encoded.
        assert!(!name.is_empty(), "aggregation name must not be empty");
        Self {
            name,
            pipeline_aggregators,
            metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pipeline_aggregators(&self) -> &[PipelineAggregatorRef] {
        &self.pipeline_aggregators
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref()
    }

    pub fn read_from(input: &mut StreamInput) -> Result<Self, DecodeError> {
        let name = input.read_string()?;
        if name.is_empty() {
            return Err(DecodeError::EmptyName);
        }
        let count = input.read_collection_len()?;
        let mut pipeline_aggregators = Vec::with_capacity(count);
        for _ in 0..count {
            pipeline_aggregators.push(PipelineAggregatorRef::read_from(input)?);
        }
        let metadata = input.read_map()?;
        Ok(Self {
            name,
            pipeline_aggregators,
            metadata,
        })
    }
}

impl Writeable for AggregationHeader {
    fn write_to(&self, out: &mut StreamOutput) {
        out.write_string(&self.name);
        out.write_len(self.pipeline_aggregators.len());
        for pipeline in &self.pipeline_aggregators {
            pipeline.write_to(out);
        }
        out.write_map(self.metadata.as_ref());
    }
}
