#[cfg(feature = "allow_filesystem")]
mod test_rig_from_file;
