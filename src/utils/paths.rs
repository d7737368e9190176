use anyhow::{Result, anyhow};
use std::path::PathBuf;

pub fn get_ocean_tasks_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".ocean-tasks"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_ocean_tasks_dir()?;
    Ok(app_dir.join("config.toml"))
}

pub fn get_cache_dir() -> Result<PathBuf> {
    let app_dir = get_ocean_tasks_dir()?;
    Ok(app_dir.join("cache"))
}

/// Cache slot for the serialized task list; the "todos" name is fixed.
pub fn get_list_cache_path() -> Result<PathBuf> {
    let cache_dir = get_cache_dir()?;
    Ok(cache_dir.join("todos.json"))
}

pub fn get_logs_dir() -> Result<PathBuf> {
    let app_dir = get_ocean_tasks_dir()?;
    Ok(app_dir.join("logs"))
}

pub fn get_crash_log_path() -> Result<PathBuf> {
    let app_dir = get_ocean_tasks_dir()?;
    Ok(app_dir.join("crash.log"))
}

pub fn get_yank_file_path() -> Result<PathBuf> {
    let app_dir = get_ocean_tasks_dir()?;
    Ok(app_dir.join("yank.txt"))
}
