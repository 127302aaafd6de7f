mod defaults;
mod model;
