use std::fs;
use tempfile::TempDir;
use tmpl_render::utils::validation::Validate;
use tmpl_render::{CliConfig, LocalStorage, RenderEngine, RenderError, SimplePipeline};

fn config_in(dir: &TempDir) -> (CliConfig, LocalStorage) {
    let config = CliConfig {
        template: "index.html.tmpl".to_string(),
        params: "env/params".to_string(),
        output: Some("dist/index.html".to_string()),
        placeholder: "params".to_string(),
        bind: vec![],
        permissive: false,
        verbose: false,
    };
    let storage = LocalStorage::new(dir.path().display().to_string());
    (config, storage)
}

#[test]
fn test_render_end_to_end() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html.tmpl"), "<div>${params}</div>").unwrap();
    fs::create_dir_all(dir.path().join("env")).unwrap();
    fs::write(dir.path().join("env/params"), "color: red;").unwrap();

    let (config, storage) = config_in(&dir);
    assert!(config.validate().is_ok());

    let engine = RenderEngine::new(SimplePipeline::new(storage, config));
    let destination = engine.run().unwrap();

    assert_eq!(destination, "dist/index.html");
    let rendered = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
    assert_eq!(rendered, "<div>color: red;</div>");
    assert!(!rendered.contains("${params}"));
}

#[test]
fn test_render_full_page_with_bare_placeholder() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("index.html.tmpl"),
        "<html>\n<head><style>\n$params\n</style></head>\n<body></body>\n</html>\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("env")).unwrap();
    fs::write(dir.path().join("env/params"), "body { margin: 0; }").unwrap();

    let (config, storage) = config_in(&dir);
    let engine = RenderEngine::new(SimplePipeline::new(storage, config));
    engine.run().unwrap();

    let rendered = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
    assert!(rendered.contains("<style>\nbody { margin: 0; }\n</style>"));
}

#[test]
fn test_missing_template_file_names_path() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("env")).unwrap();
    fs::write(dir.path().join("env/params"), "color: red;").unwrap();

    let (config, storage) = config_in(&dir);
    let engine = RenderEngine::new(SimplePipeline::new(storage, config));

    let err = engine.run().unwrap_err();
    match err {
        RenderError::FileReadError { path, .. } => {
            assert!(path.ends_with("index.html.tmpl"), "path was: {path}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_params_file_names_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html.tmpl"), "<div>${params}</div>").unwrap();

    let (config, storage) = config_in(&dir);
    let engine = RenderEngine::new(SimplePipeline::new(storage, config));

    let err = engine.run().unwrap_err();
    match err {
        RenderError::FileReadError { path, .. } => {
            assert!(path.ends_with("env/params"), "path was: {path}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_output_parent_directory_is_created() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html.tmpl"), "${params}").unwrap();
    fs::create_dir_all(dir.path().join("env")).unwrap();
    fs::write(dir.path().join("env/params"), "ok").unwrap();

    let (mut config, storage) = config_in(&dir);
    config.output = Some("deeply/nested/out/index.html".to_string());

    let engine = RenderEngine::new(SimplePipeline::new(storage, config));
    engine.run().unwrap();

    let rendered = fs::read_to_string(dir.path().join("deeply/nested/out/index.html")).unwrap();
    assert_eq!(rendered, "ok");
}

#[test]
fn test_extra_bind_flags_fill_additional_placeholders() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("index.html.tmpl"),
        "<title>${title}</title><style>${params}</style>",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("env")).unwrap();
    fs::write(dir.path().join("env/params"), "p { color: red; }").unwrap();

    let (mut config, storage) = config_in(&dir);
    config.bind = vec!["title=Landing".to_string()];
    assert!(config.validate().is_ok());

    let engine = RenderEngine::new(SimplePipeline::new(storage, config));
    engine.run().unwrap();

    let rendered = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
    assert_eq!(
        rendered,
        "<title>Landing</title><style>p { color: red; }</style>"
    );
}
