//! `AnimationModule.forRoot(...)` becomes `provideAnimations()`.

use super::edit_sources;
use camino::Utf8Path;
use ngstep_edit::{EditResult, SourceFile};
use ngstep_types::EditBatch;

const ANIMATIONS_MODULE: &str = "@angular/platform-browser/animations";

pub(crate) fn apply(root: &Utf8Path) -> anyhow::Result<EditBatch> {
    edit_sources(root, "**/*.ts", fix_file)
}

fn fix_file(file: &mut SourceFile) -> EditResult<()> {
    if !file.text().contains("AnimationModule") {
        return Ok(());
    }
    if file.replace_calls("AnimationModule.forRoot", "provideAnimations()")? == 0 {
        return Ok(());
    }
    file.ensure_named_import(ANIMATIONS_MODULE, "provideAnimations")?;
    if file.references("AnimationModule") == 0
        && let Some(source) = file.import_source("AnimationModule")
    {
        file.remove_named_import(&source, "AnimationModule")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_temp_repo, read};
    use pretty_assertions::assert_eq;

    #[test]
    fn replaces_call_and_swaps_import() {
        let (_temp, root) = create_temp_repo(&[(
            "src/app/app.module.ts",
            "import { NgModule } from '@angular/core';
import { AnimationModule } from './legacy/animation';

@NgModule({
  providers: [AnimationModule.forRoot({ disabled: false })],
})
export class AppModule {}
",
        )]);

        assert_eq!(apply(&root).expect("fix").changed_count(), 1);
        assert_eq!(
            read(&root, "src/app/app.module.ts"),
            "import { NgModule } from '@angular/core';
import { provideAnimations } from '@angular/platform-browser/animations';

@NgModule({
  providers: [provideAnimations()],
})
export class AppModule {}
"
        );
        assert_eq!(apply(&root).expect("fix").changed_count(), 0);
    }

    #[test]
    fn keeps_import_that_is_still_referenced() {
        let (_temp, root) = create_temp_repo(&[(
            "src/app/app.module.ts",
            "import { AnimationModule } from './legacy/animation';\nexport const a = AnimationModule.forRoot();\nexport const b = AnimationModule;\n",
        )]);

        apply(&root).expect("fix");
        let text = read(&root, "src/app/app.module.ts");
        assert!(text.contains("import { AnimationModule } from './legacy/animation';"));
        assert!(text.contains("export const a = provideAnimations();"));
    }
}
