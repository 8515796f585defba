use crate::{
    collections::{Collection, Key, each},
    runtime::{object::Object, value::Value},
};

/// Copies every own and inherited key of each source into `target`.
///
/// Sources apply left to right, so later sources overwrite earlier ones.
pub fn extend<'t>(target: &'t mut Object, sources: &[&Object]) -> &'t mut Object {
    for source in sources {
        for_in(source, |key, value| {
            target.insert(key, value.clone());
        });
    }
    target
}

/// Like [`extend`], but never overwrites a key `target` owns.
///
/// Keys `target` only inherits through its prototype are filled in.
pub fn defaults<'t>(target: &'t mut Object, sources: &[&Object]) -> &'t mut Object {
    for source in sources {
        for_in(source, |key, value| {
            if !target.has_own(key) {
                target.insert(key, value.clone());
            }
        });
    }
    target
}

/// Visits own keys, then inherited ones nearest prototype first.
///
/// A key shadowed by a nearer level is visited once, with the nearer value.
pub fn for_in<F>(object: &Object, mut visit: F)
where
    F: FnMut(&str, &Value),
{
    let mut seen: Vec<&str> = Vec::new();
    let mut level = Some(object);
    while let Some(current) = level {
        let _ = each(Collection::Mapping(current), |value, key, _| {
            if let Key::Name(name) = key {
                if !seen.contains(&name) {
                    seen.push(name);
                    visit(name, value);
                }
            }
            Ok(())
        });
        level = current.prototype().map(|proto| proto.as_ref());
    }
}
