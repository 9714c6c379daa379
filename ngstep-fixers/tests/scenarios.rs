use camino::{Utf8Path, Utf8PathBuf};
use ngstep_fixers::Dispatcher;
use ngstep_types::{FixKind, FixStatus, FixTarget};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tempfile::TempDir;

fn create_temp_repo(files: &[(&str, &str)]) -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent).expect("create dirs");
        }
        fs_err::write(&path, contents).expect("write fixture");
    }
    (temp, root)
}

fn read(root: &Utf8Path, rel: &str) -> String {
    fs_err::read_to_string(root.join(rel)).expect("read")
}

#[test]
fn es5_target_is_modernized_once() {
    let (_temp, root) = create_temp_repo(&[(
        "tsconfig.json",
        "{\n  \"compilerOptions\": {\n    \"target\": \"es5\"\n  }\n}\n",
    )]);
    let dispatcher = Dispatcher::new();

    let first = dispatcher
        .apply(&root, &[FixTarget::TsTargetModernize])
        .expect("first run");
    assert_eq!(first.total_changed(), 1);
    let tsconfig: serde_json::Value =
        serde_json::from_str(&read(&root, "tsconfig.json")).expect("json");
    assert_eq!(tsconfig["compilerOptions"]["target"], "es2015");

    let second = dispatcher
        .apply(&root, &[FixTarget::TsTargetModernize])
        .expect("second run");
    assert_eq!(second.total_changed(), 0);
}

#[test]
fn http_module_is_replaced_exactly_once() {
    let module = "import { NgModule } from '@angular/core';
import { HttpModule } from '@angular/http';
import { BrowserModule } from '@angular/platform-browser';

@NgModule({
  declarations: [AppComponent],
  imports: [
    BrowserModule,
    HttpModule,
  ],
  bootstrap: [AppComponent],
})
export class AppModule {}
";
    let (_temp, root) = create_temp_repo(&[("src/app/app.module.ts", module)]);
    let dispatcher = Dispatcher::new();

    for _ in 0..2 {
        dispatcher
            .apply(&root, &[FixTarget::HttpModuleFix])
            .expect("dispatch");
    }

    let text = read(&root, "src/app/app.module.ts");
    assert!(!text.contains("@angular/http"));
    assert!(!text.contains("HttpModule,"));
    assert_eq!(
        text.matches("import { HttpClientModule } from '@angular/common/http';")
            .count(),
        1
    );
    assert_eq!(text.matches("    HttpClientModule").count(), 1);
}

#[test]
fn total_counts_only_counting_fixes() {
    let (_temp, root) = create_temp_repo(&[
        ("tsconfig.json", "{\"compilerOptions\": {\"target\": \"es5\"}}"),
        (".browserslistrc", "defaults\nIE 11\n"),
        ("src/main.ts", "const legacy = require('legacy');\n"),
        (
            "angular.json",
            "{\"projects\": {\"app\": {\"architect\": {\"e2e\": {\"builder\": \"@angular-devkit/build-angular:protractor\"}}}}}",
        ),
    ]);

    let run = Dispatcher::new()
        .apply(
            &root,
            &[
                FixTarget::CommonJsUsageReview,
                FixTarget::TsTargetModernize,
                FixTarget::ProtractorBuilderReview,
                FixTarget::Ie11BrowserslistCleanup,
                FixTarget::WebpackConfigReview,
            ],
        )
        .expect("dispatch");

    let names: Vec<&str> = run.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "commonJsUsageReview",
            "tsTargetModernize",
            "protractorBuilderReview",
            "ie11BrowserslistCleanup",
            "webpackConfigReview",
        ]
    );
    assert_eq!(run.total_changed(), 2);
    assert_eq!(read(&root, "src/main.ts"), "const legacy = require('legacy');\n");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn non_counting_fixes_never_change_the_total(
        picks in proptest::collection::vec(0usize..FixTarget::ALL.len(), 0..8)
    ) {
        let (_temp, root) = create_temp_repo(&[
            ("src/main.ts", "const x = require('x');\n"),
            ("angular.json", "{}"),
        ]);
        let targets: Vec<FixTarget> = picks
            .into_iter()
            .map(|i| FixTarget::ALL[i])
            .filter(|t| t.kind() != FixKind::Counting)
            .collect();

        let run = Dispatcher::new().apply(&root, &targets).expect("dispatch");
        prop_assert_eq!(run.total_changed(), 0);
        let none_applied = run.entries.iter().all(|e| !matches!(e.status, FixStatus::Applied { .. }));
        prop_assert!(none_applied);
    }
}
