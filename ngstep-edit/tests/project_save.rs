//! Load/save behaviour of `Project` against a real directory tree.

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use ngstep_edit::Project;
use ngstep_types::EditOutcome;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn create_temp_repo(files: &[(&str, &str)]) -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");
    for (rel, contents) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, contents).expect("write");
    }
    (temp, root)
}

fn outcome_of<'a>(batch: &'a ngstep_types::EditBatch, root: &Utf8Path, rel: &str) -> &'a EditOutcome {
    &batch
        .files
        .iter()
        .find(|f| f.path == root.join(rel))
        .expect("file in batch")
        .outcome
}

const APP_MODULE: &str = "import { NgModule } from '@angular/core';\nimport { HttpModule } from '@angular/http';\n\n@NgModule({\n  imports: [HttpModule],\n  entryComponents: [],\n})\nexport class AppModule {}\n";

#[test]
fn selector_limits_loaded_files() {
    let (_temp, root) = create_temp_repo(&[
        ("src/app/app.module.ts", APP_MODULE),
        ("src/app/app.component.ts", "export class AppComponent {}\n"),
        ("node_modules/lib/lib.module.ts", APP_MODULE),
        ("app.module.ts", APP_MODULE),
    ]);

    let project = Project::load(&root, "**/*.module.ts").expect("load");
    let loaded: Vec<_> = project
        .files()
        .iter()
        .map(|f| ngstep_scan::relative_to(&root, f.path()))
        .collect();
    assert_eq!(loaded, vec!["app.module.ts", "src/app/app.module.ts"]);
}

#[test]
fn broken_file_is_skipped_while_others_save() {
    let (_temp, root) = create_temp_repo(&[
        ("src/a.module.ts", APP_MODULE),
        ("src/b.module.ts", "@NgModule({ entryComponents: [X] \nexport class B {\n"),
        ("src/c.module.ts", "export class C {}\n"),
    ]);

    let mut project = Project::load(&root, "**/*.module.ts").expect("load");
    for file in project.files_mut() {
        file.remove_decorator_property("NgModule", "entryComponents")
            .expect("edit");
    }
    let batch = project.save();

    assert_eq!(outcome_of(&batch, &root, "src/a.module.ts"), &EditOutcome::Changed);
    assert!(matches!(
        outcome_of(&batch, &root, "src/b.module.ts"),
        EditOutcome::Skipped { .. }
    ));
    assert_eq!(outcome_of(&batch, &root, "src/c.module.ts"), &EditOutcome::Unchanged);
    assert_eq!(batch.changed_count(), 1);

    assert!(!fs::read_to_string(root.join("src/a.module.ts"))
        .expect("read")
        .contains("entryComponents"));
    assert_eq!(
        fs::read_to_string(root.join("src/c.module.ts")).expect("read"),
        "export class C {}\n"
    );
}

#[test]
fn http_module_edits_are_idempotent_across_loads() {
    let (_temp, root) = create_temp_repo(&[("src/app/app.module.ts", APP_MODULE)]);

    let run = || {
        let mut project = Project::load(&root, "**/*.module.ts").expect("load");
        for file in project.files_mut() {
            file.remove_named_import("@angular/http", "HttpModule").expect("edit");
            file.remove_from_decorator_array("NgModule", "imports", "HttpModule")
                .expect("edit");
            file.ensure_named_import("@angular/common/http", "HttpClientModule")
                .expect("edit");
            file.add_to_decorator_array("NgModule", "imports", "HttpClientModule")
                .expect("edit");
        }
        project.save().changed_count()
    };

    assert_eq!(run(), 1);
    let once = fs::read_to_string(root.join("src/app/app.module.ts")).expect("read");
    assert_eq!(run(), 0);
    let twice = fs::read_to_string(root.join("src/app/app.module.ts")).expect("read");

    assert_eq!(once, twice);
    assert_eq!(
        once,
        "import { NgModule } from '@angular/core';\nimport { HttpClientModule } from '@angular/common/http';\n\n@NgModule({\n  imports: [HttpClientModule],\n  entryComponents: [],\n})\nexport class AppModule {}\n"
    );
}
