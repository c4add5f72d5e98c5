use std::path::Path;

use ferry_interchange::MigrationIntent;

use crate::error::FerryError;
use crate::output::{write_tree, GeneratedFile, WriteReport};

/// A code generator consuming the read-only migration intent.
///
/// Rendering is separate from writing: an emitter builds its whole tree in
/// memory first, so a rendering failure writes nothing.
pub trait Emitter: Send + Sync {
    /// Short name used in logs, errors and the generation manifest.
    fn name(&self) -> &'static str;

    fn render(&self, intent: &MigrationIntent) -> Result<Vec<GeneratedFile>, FerryError>;

    /// Render and write to `out_dir`.
    fn emit(
        &self,
        intent: &MigrationIntent,
        out_dir: &Path,
        on_write: &mut dyn FnMut(&Path),
    ) -> Result<WriteReport, FerryError> {
        let files = self.render(intent)?;
        write_tree(out_dir, self.name(), &files, on_write)
    }
}
