use labinterp_core::bioref::{BioReference, LocalReferences, ReferenceService};
use labinterp_core::error::LabError;
use labinterp_core::interpret::Interpreter;

use crate::output;

pub fn run(
    test: &str,
    url: Option<String>,
    api_key: Option<String>,
    auth_header: String,
    output_format: &str,
) -> Result<(), LabError> {
    let name = Interpreter::builtin()?.canonicalize(test);
    let service = attach_remote(
        ReferenceService::new(LocalReferences::builtin()?),
        url,
        api_key,
        auth_header,
    );

    let reference = service
        .combined(&name)
        .ok_or_else(|| LabError::ReferenceNotFound(name.clone()))?;

    match output_format {
        "json" => output::json::print(&reference)?,
        _ => print_reference(&reference),
    }
    Ok(())
}

#[cfg(feature = "remote")]
fn attach_remote(
    service: ReferenceService,
    url: Option<String>,
    api_key: Option<String>,
    auth_header: String,
) -> ReferenceService {
    use labinterp_core::bioref::remote::{RemoteConfig, RemoteReferences};

    let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
        return service;
    };
    let mut config = RemoteConfig::new(url).with_auth_header(auth_header);
    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }
    service.with_remote(Box::new(RemoteReferences::new(config)))
}

#[cfg(not(feature = "remote"))]
fn attach_remote(
    service: ReferenceService,
    url: Option<String>,
    _api_key: Option<String>,
    _auth_header: String,
) -> ReferenceService {
    if url.is_some() {
        tracing::warn!("remote reference lookup needs the 'remote' feature; using local data only");
    }
    service
}

fn print_reference(reference: &BioReference) {
    println!("{}", reference.test);
    if let Some(ref range) = reference.normal_range {
        let unit = reference.unit.as_deref().unwrap_or("");
        println!("  Reference range: {range} {unit}");
    }
    if let Some(ref source) = reference.source {
        println!("  Source: {source}");
    }
    if !reference.notes.is_empty() {
        println!("\n  Notes:");
        for note in &reference.notes {
            println!("    - {note}");
        }
    }
    if !reference.interferences.is_empty() {
        println!("\n  Interferences:");
        for i in &reference.interferences {
            let effect = i.effect.as_deref().map(|e| format!(" ({e})")).unwrap_or_default();
            match i.note {
                Some(ref note) => println!("    - {}{effect}: {note}", i.name),
                None => println!("    - {}{effect}", i.name),
            }
        }
    }
}
