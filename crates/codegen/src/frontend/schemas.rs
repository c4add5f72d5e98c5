use ferry_core::naming::camel_case;
use ferry_interchange::MigrationIntent;

use crate::fields::{ts_key, FieldRule};
use crate::template::{CodeWriter, LocalNames};

/// Generate src/utils/validationSchemas.ts: one exported `yup` object per
/// validated form bean, keyed by the bean's fields.
pub(super) fn validation_schemas(intent: &MigrationIntent) -> String {
    let mut w = CodeWriter::new();
    if intent.validation_rules.is_empty() {
        w.line("export {};");
        return w.finish();
    }

    let mut names = LocalNames::new();
    w.line("import * as yup from 'yup';");
    for (bean, rule) in &intent.validation_rules {
        let name = names.claim(&format!("{}Schema", camel_case(bean)), bean);
        w.blank();
        w.block(format!("export const {name} = yup.object({{"), "});", |w| {
            for field in &rule.fields {
                w.line(format!(
                    "{}: {},",
                    ts_key(field),
                    FieldRule::for_field(field).yup_schema(field)
                ));
            }
        });
    }
    w.finish()
}
