// @generated by gesture_config_compiler. Do not edit.

pub static GESTURE_ENGINE_CONFIG: GestureEngineConfig = GestureEngineConfig {
    shake: ShakeConfig {
        enabled: true,
        magnitude_threshold: 2.5,
        sample_interval_ms: 100,
        burst: BurstConfig {
            required_count: 3,
            window_ms: 1000,
            cooldown_ms: 3000,
        },
    },
    volume_sequence: VolumeSequenceConfig {
        enabled: true,
        trigger_key_code: 24,
        burst: BurstConfig {
            required_count: 3,
            window_ms: 2000,
            cooldown_ms: 3000,
        },
    },
    dispatch: DispatchConfig {
        status_path: "drone_status",
        assistant_log_path: "emergency_events",
        sequence_emergency: EmergencyType::Medical,
    },
};
