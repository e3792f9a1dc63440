// Cached compilation of the patterns used to recognize pool lines

mod cache;
