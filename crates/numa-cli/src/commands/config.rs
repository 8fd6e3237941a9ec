use numa_policy::PolicyConfig;

pub fn scaffold(numa_nodes: usize) -> anyhow::Result<()> {
    print!("{}", scaffold_toml(numa_nodes)?);
    Ok(())
}

fn scaffold_toml(numa_nodes: usize) -> anyhow::Result<String> {
    let config = PolicyConfig::with_node_count(numa_nodes);
    config.validate()?;
    Ok(config.to_toml_string()?)
}
