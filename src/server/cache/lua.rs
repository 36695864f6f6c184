//! Lua scripts for the Valkey cache wrapper.

// Lua script to atomically scan for keys matching a pattern and delete them.
// Runs the full SCAN loop server-side so invalidation is a single round trip
// and no matching key survives between the scan and the delete.
//
// ARGV[1]: glob pattern (e.g. "games:2025:5*")
//
// Returns: number of keys deleted
pub static INVALIDATE_PATTERN_SCRIPT: &str = r#"
local cursor = "0"
local removed = 0

repeat
    local result = redis.call('SCAN', cursor, 'MATCH', ARGV[1], 'COUNT', 100)
    cursor = result[1]
    for _, key in ipairs(result[2]) do
        redis.call('DEL', key)
        removed = removed + 1
    end
until cursor == "0"

return removed
"#;
