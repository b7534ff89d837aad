use std::{env, fs, path::PathBuf};

const FIXTURE_EXTENSIONS: [&str; 3] = ["gbr", "drl", "xln"];

// `{name}`, `{path}`, `{dir}` and `{stem}` are filled in per fixture.
const TEST_TEMPLATE: &str = r#"
#[test]
fn snapshot_{name}_tokens() {
    let input = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/{path}"));
    insta::with_settings!({snapshot_path => concat!(env!("CARGO_MANIFEST_DIR"), "/{dir}"), prepend_module_to_snapshot => false}, {
        insta::assert_snapshot!("{stem}.tokens", crate::testing::snapshot_tokens_from_str(input));
    });
}

#[test]
fn partition_{name}() {
    let input = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/{path}"));
    let joined: String = crate::lex(input).map(|token| token.lexeme).collect();
    assert_eq!(joined, input);
}
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let root = manifest_dir.join("test-data");
    println!("cargo:rerun-if-changed={}", root.display());

    let mut fixtures = Vec::new();
    for dir in ["gerber", "drill"] {
        let dir = root.join(dir);
        if !dir.exists() {
            continue;
        }
        println!("cargo:rerun-if-changed={}", dir.display());
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let is_fixture = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| FIXTURE_EXTENSIONS.contains(&ext));
            if is_fixture {
                println!("cargo:rerun-if-changed={}", path.display());
                fixtures.push(path);
            }
        }
    }
    fixtures.sort();

    let mut generated = String::new();
    for path in &fixtures {
        let rel = path.strip_prefix(&manifest_dir)?.to_string_lossy().replace('\\', "/");
        let (dir, _) = rel.rsplit_once('/').ok_or("fixture outside test-data")?;
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or("fixture name is not UTF-8")?;
        let name: String = stem
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();

        generated.push_str(
            &TEST_TEMPLATE
                .replace("{name}", &name)
                .replace("{path}", &rel)
                .replace("{dir}", dir)
                .replace("{stem}", stem),
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    fs::write(out_dir.join("generated_tests.rs"), generated)?;
    Ok(())
}
