//! Win32 / WGL platform
//!
//! A hidden window with its own device context (`CS_OWNDC`), a legacy
//! `wglCreateContext` context, and the few GL entry points the probe needs,
//! resolved through `wglGetProcAddress` with a fallback to the exports of
//! `opengl32.dll`.

use std::ffi::{c_char, c_void, CStr, CString};
use std::{mem, ptr};

use glprobe_core::GlQueries;
use windows_sys::Win32::{
    Foundation::{GetLastError, ERROR_CLASS_ALREADY_EXISTS, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM},
    Graphics::{
        Gdi::{GetDC, ReleaseDC, HDC},
        OpenGL::{
            wglCreateContext, wglDeleteContext, wglGetProcAddress, wglMakeCurrent, ChoosePixelFormat,
            SetPixelFormat, HGLRC, PFD_DOUBLEBUFFER, PFD_DRAW_TO_WINDOW, PFD_SUPPORT_OPENGL, PFD_TYPE_RGBA,
            PIXELFORMATDESCRIPTOR,
        },
    },
    System::LibraryLoader::{GetModuleHandleA, GetProcAddress},
    UI::WindowsAndMessaging::{
        AdjustWindowRectEx, CreateWindowExA, DefWindowProcA, DestroyWindow, LoadCursorW, RegisterClassA,
        UnregisterClassA, CS_HREDRAW, CS_OWNDC, CS_VREDRAW, IDC_ARROW, WNDCLASSA, WS_CLIPCHILDREN,
        WS_CLIPSIBLINGS, WS_EX_APPWINDOW, WS_EX_WINDOWEDGE, WS_OVERLAPPEDWINDOW,
    },
};

use crate::config::{ContextConfig, PixelFormatRequest};
use crate::error::PlatformError;
use crate::platform::Platform;

const CLASS_NAME: &[u8] = b"glprobe OpenGL\0";

const ERROR_INVALID_PARAMETER: u32 = 87;
const ERROR_PROC_NOT_FOUND: u32 = 127;

type GetStringFn = unsafe extern "system" fn(name: u32) -> *const u8;
type GetStringiFn = unsafe extern "system" fn(name: u32, index: u32) -> *const u8;
type GetIntegervFn = unsafe extern "system" fn(name: u32, data: *mut i32);
type GetExtensionsStringArbFn = unsafe extern "system" fn(dc: HDC) -> *const c_char;

fn last_error(operation: &'static str) -> PlatformError {
    PlatformError::new(operation, unsafe { GetLastError() })
}

// Every message goes to the default handler; the window is never shown.
unsafe extern "system" fn wnd_proc(window: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe { DefWindowProcA(window, msg, wparam, lparam) }
}

fn pixel_format_descriptor(request: &PixelFormatRequest) -> PIXELFORMATDESCRIPTOR {
    let mut flags = PFD_DRAW_TO_WINDOW | PFD_SUPPORT_OPENGL;
    if request.double_buffer {
        flags |= PFD_DOUBLEBUFFER;
    }

    PIXELFORMATDESCRIPTOR {
        nSize: mem::size_of::<PIXELFORMATDESCRIPTOR>() as u16,
        nVersion: 1,
        dwFlags: flags,
        iPixelType: PFD_TYPE_RGBA,
        cColorBits: request.color_bits,
        cAlphaBits: request.alpha_bits,
        cAccumBits: request.accum_bits,
        cDepthBits: request.depth_bits,
        cStencilBits: request.stencil_bits,
        // Main plane, no aux buffers, shifts and masks ignored
        ..unsafe { mem::zeroed() }
    }
}

/// Resolve a GL or WGL entry point for the current context.
fn load_gl_func(name: &CStr, module: HINSTANCE) -> *const c_void {
    let name = name.as_ptr().cast::<u8>();
    let address = unsafe { wglGetProcAddress(name) };
    // Some ICDs hand back small sentinels instead of null
    let address = address.filter(|&f| !matches!(f as usize, 1 | 2 | 3 | usize::MAX));
    let address = match address {
        Some(f) => Some(f),
        None if !module.is_null() => unsafe { GetProcAddress(module, name) },
        None => None,
    };
    address.map_or(ptr::null(), |f| f as *const c_void)
}

unsafe fn owned_string(raw: *const c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned())
}

/// Entry points loaded against the live WGL context.
pub struct WglFunctions {
    get_string: GetStringFn,
    get_integerv: GetIntegervFn,
    get_stringi: Option<GetStringiFn>,
}

impl GlQueries for WglFunctions {
    fn get_parameter_string(&self, parameter: u32) -> Option<String> {
        unsafe { owned_string((self.get_string)(parameter).cast()) }
    }

    fn get_parameter_indexed_string(&self, parameter: u32, index: u32) -> Option<String> {
        let get_stringi = self.get_stringi?;
        unsafe { owned_string(get_stringi(parameter, index).cast()) }
    }

    fn supports_indexed_strings(&self) -> bool {
        self.get_stringi.is_some()
    }

    fn get_parameter_i32_slice(&self, parameter: u32, out: &mut [i32]) {
        // Large enough for any integer state the probe reads; the driver
        // decides how many values it writes.
        let mut scratch = [0i32; 16];
        unsafe { (self.get_integerv)(parameter, scratch.as_mut_ptr()) };
        let len = out.len().min(scratch.len());
        out[..len].copy_from_slice(&scratch[..len]);
    }
}

/// Raw Win32 handles for the probe window and its context.
pub struct WglPlatform {
    instance: HINSTANCE,
    window: HWND,
    dc: HDC,
    context: HGLRC,
    class_registered: bool,
}

impl WglPlatform {
    pub fn new() -> Self {
        Self {
            instance: ptr::null_mut(),
            window: ptr::null_mut(),
            dc: ptr::null_mut(),
            context: ptr::null_mut(),
            class_registered: false,
        }
    }

    fn platform_extensions(&self, module: HINSTANCE) -> Option<String> {
        let address = load_gl_func(c"wglGetExtensionsStringARB", module);
        if address.is_null() {
            return None;
        }
        let get_extensions: GetExtensionsStringArbFn = unsafe { mem::transmute(address) };
        unsafe { owned_string(get_extensions(self.dc)) }
    }
}

impl Default for WglPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for WglPlatform {
    type Gl = WglFunctions;

    fn register_class(&mut self) -> Result<(), PlatformError> {
        let instance = unsafe { GetModuleHandleA(ptr::null()) };
        if instance.is_null() {
            return Err(last_error("GetModuleHandleA"));
        }
        self.instance = instance;

        let class = WNDCLASSA {
            style: CS_HREDRAW | CS_VREDRAW | CS_OWNDC,
            lpfnWndProc: Some(wnd_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: instance,
            hIcon: ptr::null_mut(),
            hCursor: unsafe { LoadCursorW(ptr::null_mut(), IDC_ARROW) },
            hbrBackground: ptr::null_mut(),
            lpszMenuName: ptr::null(),
            lpszClassName: CLASS_NAME.as_ptr(),
        };

        if unsafe { RegisterClassA(&class) } == 0 {
            let err = last_error("RegisterClassA");
            if err.code != ERROR_CLASS_ALREADY_EXISTS {
                return Err(err);
            }
            tracing::debug!("window class already registered");
        }
        self.class_registered = true;
        Ok(())
    }

    fn create_window(&mut self, config: &ContextConfig) -> Result<(), PlatformError> {
        let title = CString::new(config.title.as_str())
            .map_err(|_| PlatformError::new("CreateWindowExA", ERROR_INVALID_PARAMETER))?;

        let ex_style = WS_EX_APPWINDOW | WS_EX_WINDOWEDGE;
        let style = WS_OVERLAPPEDWINDOW | WS_CLIPSIBLINGS | WS_CLIPCHILDREN;

        // Grow the outer rectangle so the client area is the requested size
        let mut rect = RECT {
            left: 0,
            top: 0,
            right: config.width as i32,
            bottom: config.height as i32,
        };
        if unsafe { AdjustWindowRectEx(&mut rect, style, 0, ex_style) } == 0 {
            tracing::debug!(error = %last_error("AdjustWindowRectEx"), "using unadjusted window size");
        }

        let window = unsafe {
            CreateWindowExA(
                ex_style,
                CLASS_NAME.as_ptr(),
                title.as_ptr().cast(),
                style,
                0,
                0,
                rect.right - rect.left,
                rect.bottom - rect.top,
                ptr::null_mut(),
                ptr::null_mut(),
                self.instance,
                ptr::null(),
            )
        };
        if window.is_null() {
            return Err(last_error("CreateWindowExA"));
        }
        self.window = window;
        Ok(())
    }

    fn acquire_surface(&mut self) -> Result<(), PlatformError> {
        let dc = unsafe { GetDC(self.window) };
        if dc.is_null() {
            return Err(last_error("GetDC"));
        }
        self.dc = dc;
        Ok(())
    }

    fn choose_format(&mut self, request: &PixelFormatRequest) -> Result<i32, PlatformError> {
        let descriptor = pixel_format_descriptor(request);
        let index = unsafe { ChoosePixelFormat(self.dc, &descriptor) };
        if index == 0 {
            return Err(last_error("ChoosePixelFormat"));
        }
        Ok(index)
    }

    fn apply_format(&mut self, index: i32, request: &PixelFormatRequest) -> Result<(), PlatformError> {
        let descriptor = pixel_format_descriptor(request);
        if unsafe { SetPixelFormat(self.dc, index, &descriptor) } == 0 {
            return Err(last_error("SetPixelFormat"));
        }
        Ok(())
    }

    fn create_context(&mut self) -> Result<(), PlatformError> {
        let context = unsafe { wglCreateContext(self.dc) };
        if context.is_null() {
            return Err(last_error("wglCreateContext"));
        }
        self.context = context;
        Ok(())
    }

    fn make_current(&mut self) -> Result<(), PlatformError> {
        if unsafe { wglMakeCurrent(self.dc, self.context) } == 0 {
            return Err(last_error("wglMakeCurrent"));
        }
        Ok(())
    }

    fn load_functions(&mut self) -> Result<WglFunctions, PlatformError> {
        let opengl32 = unsafe { GetModuleHandleA(c"opengl32.dll".as_ptr().cast()) };

        match self.platform_extensions(opengl32) {
            Some(extensions) => tracing::debug!(count = extensions.split_whitespace().count(), "loaded WGL extension table"),
            None => tracing::debug!("wglGetExtensionsStringARB unavailable"),
        }

        let get_string = load_gl_func(c"glGetString", opengl32);
        if get_string.is_null() {
            return Err(PlatformError::new("glGetString", ERROR_PROC_NOT_FOUND));
        }
        let get_integerv = load_gl_func(c"glGetIntegerv", opengl32);
        if get_integerv.is_null() {
            return Err(PlatformError::new("glGetIntegerv", ERROR_PROC_NOT_FOUND));
        }
        let get_stringi = load_gl_func(c"glGetStringi", opengl32);
        tracing::debug!(indexed = !get_stringi.is_null(), "loaded GL entry points");

        unsafe {
            Ok(WglFunctions {
                get_string: mem::transmute::<*const c_void, GetStringFn>(get_string),
                get_integerv: mem::transmute::<*const c_void, GetIntegervFn>(get_integerv),
                get_stringi: (!get_stringi.is_null())
                    .then(|| mem::transmute::<*const c_void, GetStringiFn>(get_stringi)),
            })
        }
    }

    fn make_not_current(&mut self) -> Result<(), PlatformError> {
        if self.context.is_null() {
            return Ok(());
        }
        if unsafe { wglMakeCurrent(ptr::null_mut(), ptr::null_mut()) } == 0 {
            return Err(last_error("wglMakeCurrent"));
        }
        Ok(())
    }

    fn delete_context(&mut self) -> Result<(), PlatformError> {
        let context = mem::replace(&mut self.context, ptr::null_mut());
        if context.is_null() {
            return Ok(());
        }
        if unsafe { wglDeleteContext(context) } == 0 {
            return Err(last_error("wglDeleteContext"));
        }
        Ok(())
    }

    fn release_surface(&mut self) -> Result<(), PlatformError> {
        let dc = mem::replace(&mut self.dc, ptr::null_mut());
        if dc.is_null() {
            return Ok(());
        }
        if unsafe { ReleaseDC(self.window, dc) } == 0 {
            return Err(last_error("ReleaseDC"));
        }
        Ok(())
    }

    fn destroy_window(&mut self) -> Result<(), PlatformError> {
        let window = mem::replace(&mut self.window, ptr::null_mut());
        if window.is_null() {
            return Ok(());
        }
        if unsafe { DestroyWindow(window) } == 0 {
            return Err(last_error("DestroyWindow"));
        }
        Ok(())
    }

    fn unregister_class(&mut self) -> Result<(), PlatformError> {
        if !mem::replace(&mut self.class_registered, false) {
            return Ok(());
        }
        if unsafe { UnregisterClassA(CLASS_NAME.as_ptr(), self.instance) } == 0 {
            return Err(last_error("UnregisterClassA"));
        }
        Ok(())
    }
}
