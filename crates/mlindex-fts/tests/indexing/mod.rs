mod file_store;
mod locality_switch;
mod properties;
mod update_index;
