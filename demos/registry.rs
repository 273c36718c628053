use sovran_containers::{
    as_map, as_set, set_ops, AnyKey, AnyValue, ConcurrentMap, HashSet, MapError, TypeDescriptor,
};
use std::any::Any;
use std::sync::Arc;
use std::thread;

/// Stands in for plugin code that receives containers as opaque handles
fn describe(handle: &dyn Any) -> Result<String, MapError> {
    if let Some(map) = as_map(handle) {
        return Ok(format!(
            "map of {} -> {} with {} entries",
            map.key_type(),
            map.val_type(),
            map.len()?
        ));
    }
    if let Some(set) = as_set(handle) {
        return Ok(format!("set with {} elements: {}", set.len()?, set));
    }
    Ok("not a container".to_string())
}

fn main() -> Result<(), MapError> {
    env_logger::init();

    // Port registry: u16 ports to service names, filled from several threads
    let ports = Arc::new(ConcurrentMap::new(
        TypeDescriptor::of::<u16>(),
        TypeDescriptor::of::<String>(),
    ));

    let services = [("http", 80u16), ("https", 443), ("ssh", 22), ("dns", 53)];
    let handles: Vec<_> = services
        .iter()
        .map(|&(name, port)| {
            let ports = Arc::clone(&ports);
            thread::spawn(move || ports.put(AnyKey::new(port), AnyValue::new(name.to_string())))
        })
        .collect();
    for handle in handles {
        if let Err(e) = handle.join().expect("worker panicked") {
            println!("Registration failed: {}", e);
        }
    }

    // A caller that got the types wrong is turned away
    match ports.put(AnyKey::new(8080u32), AnyValue::new("proxy".to_string())) {
        Ok(_) => println!("This shouldn't happen - u32 is not the key type"),
        Err(e) => println!("Rejected: {}", e),
    }

    if let Some(name) = ports.get_as::<String>(&AnyKey::new(443u16))? {
        println!("Port 443 is {}", name);
    }
    println!("{}", ports);

    // Tags attached to two hosts, as mixed-type sets
    let web = HashSet::new();
    web.add(AnyKey::new("public"))?;
    web.add(AnyKey::new(443u16))?;
    web.add(AnyKey::new(("region", 1u8)))?;

    let db = HashSet::new();
    db.add(AnyKey::new("private"))?;
    db.add(AnyKey::new(("region", 1u8)))?;

    println!("Shared tags: {}", set_ops::intersect(&web, &db)?);
    println!("All tags: {}", set_ops::union(&web, &db)?);

    println!("{}", describe(&ports)?);
    println!("{}", describe(&web)?);
    println!("{}", describe(&"just a string")?);

    Ok(())
}
