pub const HID_VENDOR: u16 = 0x057e;
pub const HID_PRODUCT_GEN10: u16 = 0x0306;
pub const HID_PRODUCT_GEN20: u16 = 0x0330;

pub const REG_IR: u32 = 0xb00030;
pub const REG_IR_SENS_BLOCK1: u32 = 0xb00000;
pub const REG_IR_SENS_BLOCK2: u32 = 0xb0001a;
pub const REG_IR_MODE: u32 = 0xb00033;

pub const REG_EXTENSION_INIT1: u32 = 0xa400f0;
pub const REG_EXTENSION_INIT2: u32 = 0xa400fb;
pub const REG_EXTENSION_ID: u32 = 0xa400fa;
pub const REG_MOTION_PLUS_INIT: u32 = 0xa600f0;
pub const REG_MOTION_PLUS_ACTIVATE: u32 = 0xa600fe;
pub const REG_MOTION_PLUS_ID: u32 = 0xa600fa;

pub const VA_EXTENSION_INIT1: u8 = 0x55;
pub const VA_EXTENSION_INIT2: u8 = 0x00;
pub const VA_MOTION_PLUS_STANDALONE: u8 = 0x04;

// IR sensitivity level 3
pub const IR_SENS_BLOCK1: [u8; 9] = *b"\x02\x00\x00\x71\x01\x00\xaa\x00\x64";
pub const IR_SENS_BLOCK2: [u8; 2] = *b"\x63\x03";
pub const VA_IR_MODE_BASIC: u8 = 0x01;

pub const VA_FEATURE_ENABLE: u8 = 0x04;
pub const VA_FEATURE_DISABLE: u8 = 0x00;
pub const VA_REPORTING_CONTINUOUS: u8 = 0x04;

pub const FL_STATUS_BATTERY_LOW: u8 = 0x01;
pub const FL_STATUS_EXTENSION: u8 = 0x02;

pub const TY_RUMBLE: u8 = 0x10;
pub const TY_PLAYER_LEDS: u8 = 0x11;
pub const TY_DATA_REPORTING_MODE: u8 = 0x12;
pub const TY_IR_CAMERA_PIXEL_CLOCK_ENABLE: u8 = 0x13;
pub const TY_STATUS_INFORMATION_REQUEST: u8 = 0x15;
pub const TY_WRITE_MEMORY_AND_REGISTERS: u8 = 0x16;
pub const TY_READ_MEMORY_AND_REGISTERS: u8 = 0x17;
pub const TY_IR_CAMERA_CHIP_ENABLE: u8 = 0x1a;
pub const TY_STATUS_INFORMATION: u8 = 0x20;
pub const TY_READ_MEMORY_AND_REGISTERS_DATA: u8 = 0x21;
pub const TY_RESULT: u8 = 0x22;
pub const TY_CORE_BUTTONS: u8 = 0x30;
pub const TY_CORE_BUTTONS_ACCELEROMETER: u8 = 0x31;
pub const TY_CORE_BUTTONS_EXTENSION8: u8 = 0x32;
pub const TY_CORE_BUTTONS_ACCELEROMETER_EXTENSION16: u8 = 0x35;
pub const TY_CORE_BUTTONS_IR10_EXTENSION9: u8 = 0x36;
pub const TY_CORE_BUTTONS_ACCELEROMETER_IR10_EXTENSION6: u8 = 0x37;
