mod lookup;
mod pool;
mod samples;
