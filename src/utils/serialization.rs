use crate::roster::Roster;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

pub fn save_roster<P: AsRef<Path>>(path: P, roster: &Roster) -> io::Result<()> {
    let bytes = bincode::serialize(roster)
        .map_err(|err| io::Error::new(ErrorKind::Other, format!("serialize roster: {err}")))?;
    fs::write(path, bytes)
}

pub fn load_roster<P: AsRef<Path>>(path: P) -> io::Result<Roster> {
    let bytes = fs::read(path)?;
    bincode::deserialize(&bytes)
        .map_err(|err| io::Error::new(ErrorKind::Other, format!("deserialize roster: {err}")))
}

pub fn load_roster_or_default<P: AsRef<Path>>(path: P) -> io::Result<Roster> {
    match load_roster(path) {
        Ok(roster) => Ok(roster),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Roster::default()),
        Err(err) => Err(err),
    }
}
