mod fixture;
mod proxy;
mod types;
