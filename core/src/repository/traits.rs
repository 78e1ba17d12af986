use crate::error::PipelineError;
use crate::model::record::Record;

pub trait RoutineRepository {
    /// Read and validate the whole table. Called fresh on every render pass.
    fn load(&self) -> Result<Vec<Record>, PipelineError>;

    /// The unparsed file lines in file order, for the raw-row inspection
    /// toggle. Independent of `load`; nothing downstream consumes this.
    fn raw_rows(&self) -> Result<Vec<String>, PipelineError>;
}
