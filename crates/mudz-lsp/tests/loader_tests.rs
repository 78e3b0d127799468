//! Source loaders.
use crate::{
    ChannelLoader, FsLoader, LoadError, LoaderRequest, MemoryLoader, ProjectConfig, SourceLoader,
};
use std::time::Duration;

#[test]
fn memory_loader_round_trip() {
    let loader = MemoryLoader::new();
    assert!(matches!(loader.load("x"), Err(LoadError::NotFound(name)) if name == "x"));
    loader.save("x", "int x;").unwrap();
    assert_eq!(loader.load("x").unwrap(), "int x;");
    assert_eq!(loader.remove("x").as_deref(), Some("int x;"));
    assert!(!loader.can_compile());
    assert!(matches!(loader.compile("x"), Err(LoadError::Unsupported(_))));
}

#[test]
fn fs_loader_searches_roots_in_order() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(second.path().join("std")).unwrap();
    std::fs::write(second.path().join("std/room.c"), "inherit \"base\";").unwrap();
    std::fs::write(second.path().join("global.h"), "int debug;").unwrap();

    let loader = FsLoader::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
    // Leading slash is relative to the roots; missing extension tries `.c`.
    assert_eq!(loader.load("/std/room").unwrap(), "inherit \"base\";");
    assert_eq!(loader.load("global.h").unwrap(), "int debug;");
    assert!(matches!(loader.load("nope.h"), Err(LoadError::NotFound(_))));

    std::fs::write(first.path().join("global.h"), "int shadow;").unwrap();
    assert_eq!(loader.load("global.h").unwrap(), "int shadow;");
}

#[test]
fn fs_loader_saves_new_files_under_the_first_root() {
    let root = tempfile::tempdir().unwrap();
    let loader = FsLoader::new(vec![root.path().to_path_buf()]);
    loader.save("/new.c", "int n;").unwrap();
    assert_eq!(
        std::fs::read_to_string(root.path().join("new.c")).unwrap(),
        "int n;"
    );

    let rootless = FsLoader::default();
    assert!(matches!(rootless.save("x.c", ""), Err(LoadError::Unsupported(_))));
}

#[test]
fn channel_loader_waits_for_the_responder() {
    let (loader, requests) = ChannelLoader::new(Duration::from_secs(5));
    let responder = std::thread::spawn(move || {
        for request in requests {
            match request {
                LoaderRequest::Load { name, reply } if name == "/remote" => {
                    let _ = reply.send(Ok("int remote;".to_string()));
                }
                LoaderRequest::Load { name, reply } => {
                    let _ = reply.send(Err(format!("no such file {name}")));
                }
                LoaderRequest::Save { reply, .. } => {
                    let _ = reply.send(Ok(()));
                }
                LoaderRequest::Compile { reply, .. } => {
                    let _ = reply.send(Err("unexpected".to_string()));
                }
            }
        }
    });

    assert_eq!(loader.load("/remote").unwrap(), "int remote;");
    assert!(matches!(
        loader.load("/other"),
        Err(LoadError::Remote { message, .. }) if message.contains("/other")
    ));
    loader.save("/remote", "int x;").unwrap();
    assert!(matches!(loader.compile("/remote"), Err(LoadError::Unsupported(_))));

    drop(loader);
    responder.join().unwrap();
}

#[test]
fn channel_loader_times_out_instead_of_spinning() {
    let (loader, _requests) = ChannelLoader::new(Duration::from_millis(20));
    let err = loader.load("/slow").unwrap_err();
    assert!(matches!(err, LoadError::Timeout { ref name, .. } if name == "/slow"));
}

#[test]
fn channel_loader_takes_its_timeout_from_the_project() {
    let config = ProjectConfig {
        loader_timeout_ms: 20,
        ..ProjectConfig::default()
    };
    let (loader, _requests) = ChannelLoader::from_config(&config);
    match loader.load("/slow") {
        Err(LoadError::Timeout { timeout, .. }) => {
            assert_eq!(timeout, Duration::from_millis(20));
        }
        other => panic!("expected a timeout, got {other:?}"),
    }
}

#[test]
fn channel_loader_reports_a_gone_responder() {
    let (loader, requests) = ChannelLoader::new(Duration::from_secs(5));
    drop(requests);
    assert!(matches!(loader.load("/x"), Err(LoadError::Disconnected(_))));
}

#[test]
fn channel_loader_forwards_compile_when_enabled() {
    let (loader, requests) = ChannelLoader::new(Duration::from_secs(5));
    let loader = loader.with_compile();
    assert!(loader.can_compile());
    let responder = std::thread::spawn(move || {
        if let Ok(LoaderRequest::Compile { reply, .. }) = requests.recv() {
            let _ = reply.send(Ok("compiled".to_string()));
        }
    });
    assert_eq!(loader.compile("/room").unwrap(), "compiled");
    responder.join().unwrap();
}
